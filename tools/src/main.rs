//! teller: headless operator CLI for the branch ledger.
//!
//! Usage:
//!   teller --db bank.db open "Mona Adel" 01012345678
//!   teller --db bank.db deposit 1001 100
//!   teller --db bank.db transfer 1001 1002 150
//!   teller --db bank.db --ipc-mode

use anyhow::{bail, Result};
use chrono::NaiveDate;
use ledger_core::{
    api::{ApiReply, LedgerApi},
    config::LedgerConfig,
    engine::LedgerEngine,
    history::HistoryFilter,
    store::LedgerStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    CreateAccount {
        name: String,
        phone: String,
        #[serde(default)]
        national_id: Option<String>,
        #[serde(default)]
        balance: Option<f64>,
    },
    Deposit {
        account: String,
        amount: f64,
    },
    Withdraw {
        account: String,
        amount: f64,
    },
    Transfer {
        from: String,
        to: String,
        amount: f64,
    },
    UpdateStatus {
        account: String,
        status: String,
    },
    AttachProfile {
        account: String,
        name: String,
        phone: String,
        email: String,
    },
    GetAccount {
        account: String,
    },
    History {
        account: String,
    },
    FilteredHistory {
        #[serde(default)]
        action: Option<String>,
        #[serde(default)]
        account: Option<String>,
        #[serde(default)]
        date: Option<String>,
    },
    Dashboard,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let config = match flag_value(&args, "--config") {
        Some(path) => LedgerConfig::from_file(path)?,
        None => LedgerConfig::default(),
    };
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let store = LedgerStore::open(db)?;
    store.migrate()?;
    let api = LedgerApi::new(LedgerEngine::new(store, config)?);
    log::info!("ledger opened at {db}");

    if ipc_mode {
        return run_ipc_loop(&api);
    }

    let command = positionals(&args);
    if command.is_empty() {
        print_usage();
        return Ok(());
    }
    run_command(&api, &command)
}

// ── One-shot commands ──────────────────────────────────────────

fn run_command(api: &LedgerApi, command: &[&str]) -> Result<()> {
    let reply = match command {
        ["open", name, phone] => api.create_account(name, phone, None, None),
        ["open", name, phone, national_id] => {
            api.create_account(name, phone, Some(national_id), None)
        }
        ["open", name, phone, national_id, balance] => {
            api.create_account(name, phone, Some(national_id), Some(balance.parse()?))
        }
        ["deposit", account, amount] => api.deposit(account, amount.parse()?),
        ["withdraw", account, amount] => api.withdraw(account, amount.parse()?),
        ["transfer", from, to, amount] => api.transfer(from, to, amount.parse()?),
        ["status", account, status] => api.update_status(account, status),
        ["profile", account, name, phone, email] => {
            api.attach_profile(account, name, phone, email)
        }
        ["show", account] => api.get_account(account),
        ["history", account] => api.history_for(account),
        // `-` means "no filter" for a position.
        ["filtered", action, account, date] => {
            let filter = build_filter(opt(action), opt(account), opt(date))
                .map_err(|e| anyhow::anyhow!(e))?;
            api.filtered_history(&filter)
        }
        ["dashboard"] => api.dashboard_metrics(),
        _ => bail!("unrecognized command: {}", command.join(" ")),
    };
    print_reply(&reply)
}

fn print_reply(reply: &ApiReply) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(reply)?);
    if !reply.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_usage() {
    println!("teller — branch ledger operator CLI");
    println!();
    println!("  teller [--db PATH] [--config PATH] COMMAND");
    println!();
    println!("Commands:");
    println!("  open NAME PHONE [NATIONAL_ID] [BALANCE]");
    println!("  deposit ACCOUNT AMOUNT");
    println!("  withdraw ACCOUNT AMOUNT");
    println!("  transfer FROM TO AMOUNT");
    println!("  status ACCOUNT (active|frozen|closed)");
    println!("  profile ACCOUNT NAME PHONE EMAIL");
    println!("  show ACCOUNT");
    println!("  history ACCOUNT");
    println!("  filtered ACTION|- ACCOUNT|- DATE|-");
    println!("  dashboard");
    println!();
    println!("  --ipc-mode    line-delimited JSON commands on stdin");
}

// ── IPC mode ───────────────────────────────────────────────────

fn run_ipc_loop(api: &LedgerApi) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::CreateAccount {
                name,
                phone,
                national_id,
                balance,
            } => api.create_account(&name, &phone, national_id.as_deref(), balance),
            IpcCommand::Deposit { account, amount } => api.deposit(&account, amount),
            IpcCommand::Withdraw { account, amount } => api.withdraw(&account, amount),
            IpcCommand::Transfer { from, to, amount } => api.transfer(&from, &to, amount),
            IpcCommand::UpdateStatus { account, status } => api.update_status(&account, &status),
            IpcCommand::AttachProfile {
                account,
                name,
                phone,
                email,
            } => api.attach_profile(&account, &name, &phone, &email),
            IpcCommand::GetAccount { account } => api.get_account(&account),
            IpcCommand::History { account } => api.history_for(&account),
            IpcCommand::FilteredHistory {
                action,
                account,
                date,
            } => match build_filter(action.as_deref(), account.as_deref(), date.as_deref()) {
                Ok(filter) => api.filtered_history(&filter),
                Err(e) => {
                    write_error(&mut stdout, &e)?;
                    continue;
                }
            },
            IpcCommand::Dashboard => api.dashboard_metrics(),
        };

        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "ok": false, "message": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

// ── Argument helpers ───────────────────────────────────────────

fn build_filter(
    action: Option<&str>,
    account: Option<&str>,
    date: Option<&str>,
) -> std::result::Result<HistoryFilter, String> {
    Ok(HistoryFilter {
        action: action.map(|s| s.parse()).transpose()?,
        account: account.map(str::to_string),
        day: date
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| format!("invalid date: {e}"))?,
    })
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" | "--config" => {
                iter.next();
            }
            "--ipc-mode" => {}
            other => out.push(other),
        }
    }
    out
}

fn opt(s: &str) -> Option<&str> {
    if s == "-" {
        None
    } else {
        Some(s)
    }
}
