//! # Interactive Shell
//!
//! The read-eval loop the cashier drives from the terminal.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session                                           │
//! │                                                                         │
//! │  Welcome ──► Customer name? ──► ┌──────────────┐                        │
//! │              (skipped with      │  Main menu   │◄─────────────┐         │
//! │               --customer)       └──────┬───────┘              │         │
//! │                                        │ "1".."8"             │         │
//! │                                        ▼                      │         │
//! │                                 ┌──────────────┐   Ok / domain error    │
//! │                                 │   Command    │──────────────┘         │
//! │                                 └──────┬───────┘                        │
//! │                                        │ "9", EOF or I/O error          │
//! │                                        ▼                                │
//! │                                     Goodbye                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shell is generic over its input and output so tests can script a
//! whole session with in-memory buffers.

use std::fmt;
use std::io::{BufRead, Write};

use delicia_core::Store;
use tracing::{info, warn};

use crate::commands;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::format;

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    RegisterSale,
    ListProducts,
    FindProduct,
    ViewCart,
    EmptyCart,
    PrintReceipt,
    Reports,
    ListByCategory,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::RegisterSale,
        MenuOption::ListProducts,
        MenuOption::FindProduct,
        MenuOption::ViewCart,
        MenuOption::EmptyCart,
        MenuOption::PrintReceipt,
        MenuOption::Reports,
        MenuOption::ListByCategory,
        MenuOption::Exit,
    ];

    /// Parses the number typed at the menu prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        let index: usize = raw.trim().parse().ok()?;
        index
            .checked_sub(1)
            .and_then(|i| MenuOption::ALL.get(i).copied())
    }

    pub fn number(&self) -> usize {
        MenuOption::ALL
            .iter()
            .position(|o| o == self)
            .map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::RegisterSale => "Register sale",
            MenuOption::ListProducts => "List products",
            MenuOption::FindProduct => "Find product",
            MenuOption::ViewCart => "View cart",
            MenuOption::EmptyCart => "Empty cart",
            MenuOption::PrintReceipt => "Print receipt",
            MenuOption::Reports => "Reports",
            MenuOption::ListByCategory => "List by category",
            MenuOption::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    store: Store,
    config: AppConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: Store, config: AppConfig, input: R, output: W) -> Self {
        Shell {
            store,
            config,
            input,
            output,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Consumes the shell and hands back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session until "9", end of input, or a terminal failure.
    ///
    /// ## Errors
    /// Only I/O errors on the terminal are returned; domain errors are
    /// printed and the menu comes back.
    pub fn run(&mut self) -> CliResult<()> {
        info!(store = %self.store.name(), "Session started");
        writeln!(self.output, "Welcome to the {} system", self.store.name())?;

        if self.config.customer.is_none() && self.ask_customer()? == Flow::Quit {
            info!("Input closed before the first command");
            return Ok(());
        }

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            let flow = match MenuOption::parse(&choice) {
                Some(option) => self.handle(option)?,
                None => {
                    writeln!(self.output, "Invalid option, please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        info!(entries = self.store.cart().len(), "Session ended");
        Ok(())
    }

    /// Runs one option, printing recoverable errors.
    fn handle(&mut self, option: MenuOption) -> CliResult<Flow> {
        match self.dispatch(option) {
            Ok(flow) => Ok(flow),
            Err(err) if err.is_recoverable() => {
                warn!(code = err.code.as_str(), message = %err.message, "Command failed");
                writeln!(self.output, "Error: {}", err.message)?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    fn dispatch(&mut self, option: MenuOption) -> CliResult<Flow> {
        match option {
            MenuOption::RegisterSale => self.register_sale(),
            MenuOption::ListProducts => {
                let table = format::product_table(commands::catalog::list_products(&self.store));
                self.say(&table)
            }
            MenuOption::FindProduct => {
                let Some(query) = self.prompt("Enter product name or ID: ")? else {
                    return Ok(Flow::Quit);
                };
                let product = commands::catalog::find_product(&self.store, &query)?;
                let detail = format::product_detail(product);
                self.say(&detail)
            }
            MenuOption::ViewCart => self.view_cart(),
            MenuOption::EmptyCart => self.empty_cart(),
            MenuOption::PrintReceipt => {
                let receipt = commands::receipt::generate_receipt(&self.store)?;
                let rendered =
                    commands::receipt::render_receipt(&receipt, self.config.receipt_format)?;
                self.say(&rendered)
            }
            MenuOption::Reports => {
                let reports = commands::report::reports(&self.store, self.config.top_n);
                self.say(&format::reports(&reports))
            }
            MenuOption::ListByCategory => {
                let Some(category) = self.prompt("Enter category: ")? else {
                    return Ok(Flow::Quit);
                };
                let products = commands::catalog::list_by_category(&self.store, &category);
                let listing = format::category_list(&category, &products);
                self.say(&listing)
            }
            MenuOption::Exit => {
                writeln!(self.output, "Goodbye!")?;
                Ok(Flow::Quit)
            }
        }
    }

    fn register_sale(&mut self) -> CliResult<Flow> {
        let Some(product) = self.prompt("Enter product name or ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(Flow::Quit);
        };

        let added = commands::cart::add_to_cart(&mut self.store, &product, &quantity)?;
        self.say(&format::added(&added))
    }

    fn view_cart(&mut self) -> CliResult<Flow> {
        let view = commands::cart::view_cart(&self.store);
        self.say(&format::cart_table(&view))?;

        if view.entries.is_empty() {
            return Ok(Flow::Continue);
        }

        match self.confirm("Remove a product? (y/n): ")? {
            Some(true) => {}
            Some(false) => return Ok(Flow::Continue),
            None => return Ok(Flow::Quit),
        }

        let Some(product) = self.prompt("Enter name or ID of the product to remove: ")? else {
            return Ok(Flow::Quit);
        };
        let removed = commands::cart::remove_from_cart(&mut self.store, &product)?;
        self.say(&format!("Product \"{}\" removed from the cart.", removed.name))
    }

    fn empty_cart(&mut self) -> CliResult<Flow> {
        match self.confirm("Empty the cart? (y/n): ")? {
            Some(true) => {
                commands::cart::clear_cart(&mut self.store);
                self.say("Cart emptied.")
            }
            Some(false) => Ok(Flow::Continue),
            None => Ok(Flow::Quit),
        }
    }

    fn ask_customer(&mut self) -> CliResult<Flow> {
        let Some(name) = self.prompt("Customer name (Enter for guest): ")? else {
            return Ok(Flow::Quit);
        };
        let customer = self.store.set_customer(&name, None);
        info!(customer = %customer.name, "Customer set");
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "===== MAIN MENU =====")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}", option)?;
        }
        Ok(())
    }

    fn say(&mut self, text: &str) -> CliResult<Flow> {
        writeln!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    /// Asks a yes/no question. `None` means the input ended.
    fn confirm(&mut self, question: &str) -> CliResult<Option<bool>> {
        Ok(self
            .prompt(question)?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si")))
    }

    /// Prints `question` and reads one line. `None` means end of input.
    fn prompt(&mut self, question: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
