//! Interactive menu shell
//!
//! A numbered menu loop that holds the login session and drives every
//! core operation. Expected failures (duplicate username, bad credentials,
//! malformed input, not found) print a line and return to the menu; they
//! never abort the loop. EOF on stdin exits like the Exit option.
//!
//! Prompts read plain lines, so the shell can be driven by piped stdin.
//! Passwords are read without echo only when stdin is a terminal.

use std::io::{self, IsTerminal, Write};

use zeroize::Zeroizing;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::display;
use crate::error::{FinError, FinResult};
use crate::models::{BudgetUpdate, Money, TransactionId, TransactionKind, UserId};
use crate::services::{AuthService, BudgetService, LedgerService};
use crate::storage::Store;

const MENU: &str = "\
 1) Register                7) Report
 2) Login                   8) Set budget
 3) Add transaction         9) Back up database
 4) Update transaction     10) Restore database
 5) Delete transaction     11) Exit
 6) List transactions";

/// Whether the menu loop keeps going after an action
enum LoopControl {
    Continue,
    Exit,
}

/// The interactive shell
///
/// Holds the open store and the login session. The store lives in an
/// `Option` so backup and restore can close it around the file copy.
pub struct Shell {
    paths: FintrackPaths,
    settings: Settings,
    store: Option<Store>,
    session: Option<UserId>,
}

/// Run the interactive shell until exit or EOF
pub fn run_shell(paths: &FintrackPaths, settings: &Settings) -> FinResult<()> {
    let mut shell = Shell::new(paths.clone(), settings.clone())?;
    shell.run()
}

impl Shell {
    /// Open the store and build a shell with no active session
    pub fn new(paths: FintrackPaths, settings: Settings) -> FinResult<Self> {
        let store = Store::open(&paths.database_file())?;
        Ok(Self {
            paths,
            settings,
            store: Some(store),
            session: None,
        })
    }

    /// The menu loop
    pub fn run(&mut self) -> FinResult<()> {
        println!("Welcome to fintrack.");

        loop {
            println!();
            println!("{}", MENU);
            let choice = match read_line("Choose an option: ")? {
                Some(choice) => choice,
                None => break,
            };
            if choice.is_empty() {
                continue;
            }

            match self.dispatch(&choice) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => println!("{}", err),
            }
        }

        println!("Goodbye.");
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> FinResult<LoopControl> {
        match choice {
            "1" => self.register()?,
            "2" => self.login()?,
            "3" => self.add_transaction()?,
            "4" => self.update_transaction()?,
            "5" => self.delete_transaction()?,
            "6" => self.list_transactions()?,
            "7" => self.report()?,
            "8" => self.set_budget()?,
            "9" => self.backup_database()?,
            "10" => self.restore_database()?,
            "11" => return Ok(LoopControl::Exit),
            other => println!("Unknown option: {}", other),
        }
        Ok(LoopControl::Continue)
    }

    fn register(&mut self) -> FinResult<()> {
        let username = match read_line("Username: ")? {
            Some(username) => username,
            None => return Ok(()),
        };
        let password = match read_password("Password: ")? {
            Some(password) => password,
            None => return Ok(()),
        };

        let auth = AuthService::new(self.store()?);
        let id = auth.register(&username, &password)?;
        println!("Registered user '{}' (id {}).", username.trim(), id);
        Ok(())
    }

    fn login(&mut self) -> FinResult<()> {
        let username = match read_line("Username: ")? {
            Some(username) => username,
            None => return Ok(()),
        };
        let password = match read_password("Password: ")? {
            Some(password) => password,
            None => return Ok(()),
        };

        let auth = AuthService::new(self.store()?);
        match auth.authenticate(&username, &password)? {
            Some(id) => {
                self.session = Some(id);
                println!("Logged in as '{}'.", username.trim());
            }
            None => println!("Invalid username or password."),
        }
        Ok(())
    }

    fn add_transaction(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let kind = match read_line("Type (income/expense): ")? {
            Some(input) => match input.parse::<TransactionKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    println!("{}", err);
                    return Ok(());
                }
            },
            None => return Ok(()),
        };
        let amount = match self.prompt_amount("Amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        let description = match read_line("Description: ")? {
            Some(description) => description,
            None => return Ok(()),
        };
        let category = match read_line("Category: ")? {
            Some(category) => category,
            None => return Ok(()),
        };

        let ledger = LedgerService::new(self.store()?);
        let id = ledger.add(user, kind, amount, &description, &category)?;
        println!("Added transaction {}.", id);
        Ok(())
    }

    fn update_transaction(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let id = match self.prompt_transaction_id("Transaction id: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        let amount = match self.prompt_amount("New amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        let description = match read_line("New description: ")? {
            Some(description) => description,
            None => return Ok(()),
        };

        let ledger = LedgerService::new(self.store()?);
        ledger.update(user, id, amount, &description)?;
        println!("Updated transaction {}.", id);
        Ok(())
    }

    fn delete_transaction(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let id = match self.prompt_transaction_id("Transaction id: ")? {
            Some(id) => id,
            None => return Ok(()),
        };

        let ledger = LedgerService::new(self.store()?);
        ledger.delete(user, id)?;
        println!("Deleted transaction {}.", id);
        Ok(())
    }

    fn list_transactions(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let ledger = LedgerService::new(self.store()?);
        let transactions = ledger.list(user)?;
        print!(
            "{}",
            display::format_transaction_register(&transactions, &self.settings.date_format)
        );
        Ok(())
    }

    fn report(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let ledger = LedgerService::new(self.store()?);
        let sums = ledger.report(user)?;
        print!(
            "{}",
            display::format_report(&sums, &self.settings.currency_symbol)
        );
        Ok(())
    }

    fn set_budget(&mut self) -> FinResult<()> {
        let user = match self.require_login() {
            Some(user) => user,
            None => return Ok(()),
        };

        let category = match read_line("Category: ")? {
            Some(category) => category,
            None => return Ok(()),
        };
        let amount = match self.prompt_amount("Amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        let month = match read_line("Month (1-12): ")? {
            Some(input) => match input.parse::<u32>() {
                Ok(month) => month,
                Err(_) => {
                    println!("Invalid month: {}", input);
                    return Ok(());
                }
            },
            None => return Ok(()),
        };
        let year = match read_line("Year: ")? {
            Some(input) => match input.parse::<i32>() {
                Ok(year) => year,
                Err(_) => {
                    println!("Invalid year: {}", input);
                    return Ok(());
                }
            },
            None => return Ok(()),
        };

        let budgets = BudgetService::new(self.store()?);
        match budgets.set_budget(user, &category, amount, month, year)? {
            BudgetUpdate::Created => {
                println!("Created budget for '{}' ({}/{}).", category, month, year)
            }
            BudgetUpdate::Updated => {
                println!("Updated budget for '{}' ({}/{}).", category, month, year)
            }
        }
        Ok(())
    }

    fn backup_database(&mut self) -> FinResult<()> {
        let manager = BackupManager::new(
            self.paths.clone(),
            self.settings.backup_retention.clone(),
        );

        let (backup_path, pruned) =
            self.with_closed_store(|| manager.create_backup_with_retention())?;

        let filename = backup_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| backup_path.display().to_string());
        println!("Backup created: {}", filename);
        if !pruned.is_empty() {
            println!("Pruned {} old backup(s).", pruned.len());
        }
        Ok(())
    }

    fn restore_database(&mut self) -> FinResult<()> {
        let manager = BackupManager::new(
            self.paths.clone(),
            self.settings.backup_retention.clone(),
        );

        let name = match read_line("Backup to restore (filename or 'latest'): ")? {
            Some(name) => name,
            None => return Ok(()),
        };
        let info = if name.eq_ignore_ascii_case("latest") {
            manager.get_latest_backup()?
        } else {
            manager.get_backup(&name)?
        };
        let info = match info {
            Some(info) => info,
            None => {
                println!("Backup not found: {}", name);
                return Ok(());
            }
        };

        let answer = match read_line("Restore will overwrite current data. Continue? (yes/no): ")? {
            Some(answer) => answer,
            None => return Ok(()),
        };
        if !confirmed(&answer) {
            println!("Restore cancelled.");
            return Ok(());
        }

        let restore_manager = RestoreManager::new(self.paths.clone());
        self.with_closed_store(|| restore_manager.restore_from_file(&info.path))?;

        println!("Database restored from {}.", info.filename);
        if self.session.take().is_some() {
            println!("Session cleared; please log in again.");
        }
        Ok(())
    }

    /// The session user, or a printed nudge to log in
    fn require_login(&self) -> Option<UserId> {
        if self.session.is_none() {
            println!("Please log in first.");
        }
        self.session
    }

    fn store(&self) -> FinResult<&Store> {
        self.store
            .as_ref()
            .ok_or_else(|| FinError::Storage("Database is not open".into()))
    }

    /// Close the store, run a file operation, then reopen
    ///
    /// The reopen also re-runs schema creation, which makes a restored
    /// database immediately usable.
    fn with_closed_store<T>(&mut self, f: impl FnOnce() -> FinResult<T>) -> FinResult<T> {
        if let Some(store) = self.store.take() {
            store.close()?;
        }
        let result = f();
        self.store = Some(Store::open(&self.paths.database_file())?);
        result
    }

    fn prompt_amount(&self, prompt: &str) -> FinResult<Option<Money>> {
        let input = match read_line(prompt)? {
            Some(input) => input,
            None => return Ok(None),
        };
        match Money::parse(&input) {
            Ok(amount) => Ok(Some(amount)),
            Err(err) => {
                println!("{}", err);
                Ok(None)
            }
        }
    }

    fn prompt_transaction_id(&self, prompt: &str) -> FinResult<Option<TransactionId>> {
        let input = match read_line(prompt)? {
            Some(input) => input,
            None => return Ok(None),
        };
        match input.parse::<TransactionId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                println!("Invalid transaction id: {}", input);
                Ok(None)
            }
        }
    }
}

/// Prompt for a line of input, trimmed. Returns None on EOF.
fn read_line(prompt: &str) -> FinResult<Option<String>> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| FinError::Io(e.to_string()))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| FinError::Io(e.to_string()))?;
    if bytes == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

/// Prompt for a password. Hidden input on a terminal, a plain line otherwise.
///
/// Only the trailing newline is stripped, so passwords keep interior and
/// edge whitespace. Returns None on EOF.
fn read_password(prompt: &str) -> FinResult<Option<Zeroizing<String>>> {
    if io::stdin().is_terminal() {
        let password = rpassword::prompt_password(prompt)
            .map_err(|e| FinError::Io(format!("Failed to read password: {}", e)))?;
        return Ok(Some(Zeroizing::new(password)));
    }

    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| FinError::Io(e.to_string()))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| FinError::Io(e.to_string()))?;
    if bytes == 0 {
        return Ok(None);
    }

    let stripped = input.trim_end_matches(|c| c == '\r' || c == '\n').to_string();
    Ok(Some(Zeroizing::new(stripped)))
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
