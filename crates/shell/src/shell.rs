use std::io::{BufRead, Write};

use bookstore_catalog::{Book, KindTag, PurchaseRequest};
use bookstore_core::{Isbn, Price};
use bookstore_infra::{CatalogService, Listing, RecordStore};
use bookstore_notify::Notifier;

use crate::menu::MenuChoice;
use crate::prompt::{Prompter, ShellError};

const STORE_NAME: &str = "Quantum Book Store";

/// What the loop does after an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu loop over a catalog service.
#[derive(Debug)]
pub struct Shell<R, W, S, N> {
    prompter: Prompter<R, W>,
    service: CatalogService<S, N>,
}

impl<R, W, S, N> Shell<R, W, S, N>
where
    R: BufRead,
    W: Write,
    S: RecordStore,
    N: Notifier,
{
    pub fn new(input: R, output: W, service: CatalogService<S, N>) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            service,
        }
    }

    pub fn into_parts(self) -> (R, W, CatalogService<S, N>) {
        let (input, output) = self.prompter.into_parts();
        (input, output, self.service)
    }

    /// Run until the user exits or input ends.
    ///
    /// Action failures are printed and the loop continues; only terminal I/O
    /// errors are returned.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.print_menu()?;
            let flow = match self.prompter.line("Enter your choice: ") {
                Ok(choice) => self.dispatch(&choice),
                Err(err) => Err(err),
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) | Err(ShellError::EndOfInput) => {
                    writeln!(self.prompter.output(), "Exiting {STORE_NAME}. Bye!")?;
                    return Ok(());
                }
                Err(ShellError::Io(err)) => return Err(ShellError::Io(err)),
                Err(err) => {
                    tracing::debug!(error = %err, "menu action failed");
                    writeln!(self.prompter.output(), "Error: {err}")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<(), ShellError> {
        let out = self.prompter.output();
        writeln!(out)?;
        writeln!(out, "{STORE_NAME} Menu:")?;
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(out, "{}. {}", index + 1, choice.label())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, ShellError> {
        let Some(choice) = MenuChoice::parse(choice) else {
            writeln!(self.prompter.output(), "Invalid choice. Try again.")?;
            return Ok(Flow::Continue);
        };

        match choice {
            MenuChoice::Add(tag) => self.add(tag)?,
            MenuChoice::Purchase => self.purchase()?,
            MenuChoice::List => self.list()?,
            MenuChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, tag: KindTag) -> Result<(), ShellError> {
        let isbn: Isbn = self.prompter.line("ISBN: ")?.parse()?;
        let title = self.prompter.line("Title: ")?;
        let author = self.prompter.line("Author: ")?;
        let year: i32 = self.prompter.number("Year: ", "Year", "a whole number")?;

        let book = match tag {
            KindTag::ShowcaseItem => Book::showcase(isbn, title, author, year)?,
            _ => {
                let amount: f64 = self.prompter.number("Price: ", "Price", "a number")?;
                let price = Price::new(amount)?;
                match tag {
                    KindTag::PhysicalBook => {
                        let stock: u64 =
                            self.prompter
                                .number("Stock: ", "Stock", "a non-negative whole number")?;
                        Book::physical(isbn, title, author, year, price, stock)?
                    }
                    KindTag::DigitalBook => {
                        let format = self.prompter.line("Filetype (pdf, epub, etc.): ")?;
                        Book::digital(isbn, title, author, year, price, format.trim())?
                    }
                    _ => {
                        let format = self.prompter.line("Format (mp3, wav, etc.): ")?;
                        Book::audio(isbn, title, author, year, price, format.trim())?
                    }
                }
            }
        };

        let title = book.title().to_string();
        self.service.add(book)?;
        writeln!(self.prompter.output(), "Quantum book store: Book added -> {title}")?;
        Ok(())
    }

    fn purchase(&mut self) -> Result<(), ShellError> {
        let isbn: Isbn = self.prompter.line("Enter ISBN to buy: ")?.parse()?;
        let quantity: i64 = self
            .prompter
            .number("Quantity (0 if showcase): ", "Quantity", "a whole number")?;
        let email = self.prompter.optional("Email (press Enter if not needed): ")?;
        let address = self.prompter.optional("Address (press Enter if not needed): ")?;

        let request = PurchaseRequest {
            quantity,
            email,
            address,
        };
        let total = self.service.purchase(&isbn, &request)?;
        writeln!(self.prompter.output(), "Purchase successful. Total: {total}")?;
        Ok(())
    }

    fn list(&mut self) -> Result<(), ShellError> {
        let out = self.prompter.output();
        match self.service.list() {
            Listing::Empty => writeln!(out, "No books available in store.")?,
            Listing::Items(entries) => {
                writeln!(out)?;
                writeln!(out, "Books in {STORE_NAME}:")?;
                for entry in entries {
                    writeln!(out, "{entry}")?;
                }
            }
        }
        Ok(())
    }
}
