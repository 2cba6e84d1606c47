//! Interactive registration controller
//!
//! Drives the read-validate-persist loop:
//!
//! ```text
//! AwaitName -> AwaitTaxId -> Insert -> AwaitName
//!                  |   ^
//!                  v   | 1
//!             DuplicateMenu --2--> AwaitName
//!                  |
//!                  3--> Exit
//! ```
//!
//! `Exit` is also reached from the name prompt (exit keyword) and from any
//! prompt at end of input. Storage failures abandon the current cycle only.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{error_chain, ApplicationError, ApplicationResult, IoResultExt};
use crate::application::services::RegistrationService;
use crate::domain::{normalize_name, Client, TaxId};
use crate::infrastructure::traits::{Console, StoreConnector};

/// Typed at the name prompt (case-insensitive) to end the session.
pub const EXIT_KEYWORD: &str = "exit";

pub const NAME_PROMPT: &str = "Client name (or 'exit' to quit):";
pub const TAX_ID_PROMPT: &str = "Tax id (format 123.456.789-09):";
pub const MENU_PROMPT: &str = "Option:";

/// Counters reported when a session ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Clients inserted during the session
    pub registered: usize,
    /// Cycles abandoned because of a storage failure
    pub abandoned: usize,
}

/// How a single cycle ended.
#[derive(Debug)]
enum CycleOutcome {
    Registered(Client),
    Restart,
    Exit,
}

/// States after a name has been accepted.
#[derive(Debug)]
enum Step {
    AwaitTaxId,
    DuplicateMenu(Client),
    Insert(TaxId),
}

/// Operator choice in the duplicate menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RetryTaxId,
    NewClient,
    Exit,
}

impl MenuChoice {
    /// Surrounding whitespace is ignored, so `" 2 "` selects option 2.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::RetryTaxId),
            "2" => Some(Self::NewClient),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Context of one registration cycle: the accepted name and the cycle's
/// store connection. Dropped, and the connection released, when the
/// cycle ends.
struct Cycle {
    name: String,
    service: RegistrationService,
}

/// Interactive registration loop.
pub struct RegistrationController {
    connector: Arc<dyn StoreConnector>,
}

impl RegistrationController {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self { connector }
    }

    /// Run cycles until the operator exits.
    ///
    /// Only console I/O failures end the loop with an error.
    pub fn run(&self, console: &mut dyn Console) -> ApplicationResult<SessionSummary> {
        info!("registration session started");
        let mut summary = SessionSummary::default();

        loop {
            match self.run_cycle(console) {
                Ok(CycleOutcome::Registered(client)) => {
                    debug!("cycle registered {}", client);
                    summary.registered += 1;
                }
                Ok(CycleOutcome::Restart) => debug!("cycle restarted from duplicate menu"),
                Ok(CycleOutcome::Exit) => break,
                Err(ApplicationError::Storage(e)) => {
                    warn!("cycle abandoned: {}", error_chain(&e));
                    console.error(&format!("Database error: {}", error_chain(&e)));
                    summary.abandoned += 1;
                }
                Err(e) => return Err(e),
            }
        }

        console.info("Exiting...");
        info!(
            registered = summary.registered,
            abandoned = summary.abandoned,
            "registration session finished"
        );
        Ok(summary)
    }

    #[instrument(level = "debug", skip_all)]
    fn run_cycle(&self, console: &mut dyn Console) -> ApplicationResult<CycleOutcome> {
        let Some(name) = read_name(console)? else {
            return Ok(CycleOutcome::Exit);
        };
        let cycle = Cycle {
            name,
            service: RegistrationService::new(self.connector.connect()?),
        };

        let mut step = Step::AwaitTaxId;
        loop {
            debug!("step: {:?}", step);
            step = match step {
                Step::AwaitTaxId => {
                    let Some(tax_id) = read_tax_id(console)? else {
                        return Ok(CycleOutcome::Exit);
                    };
                    match cycle.service.ensure_unique(&tax_id) {
                        Ok(()) => Step::Insert(tax_id),
                        Err(ApplicationError::DuplicateTaxId { existing }) => {
                            Step::DuplicateMenu(existing)
                        }
                        Err(e) => return Err(e),
                    }
                }
                Step::DuplicateMenu(existing) => {
                    show_duplicate(console, &existing);
                    match read_menu_choice(console)? {
                        Some(MenuChoice::RetryTaxId) => Step::AwaitTaxId,
                        Some(MenuChoice::NewClient) => return Ok(CycleOutcome::Restart),
                        Some(MenuChoice::Exit) | None => return Ok(CycleOutcome::Exit),
                    }
                }
                Step::Insert(tax_id) => {
                    let client = cycle.service.insert(&cycle.name, &tax_id)?;
                    console.success(&format!(
                        "Client registered successfully! (id {})",
                        client.id
                    ));
                    return Ok(CycleOutcome::Registered(client));
                }
            };
        }
    }
}

/// Read a non-empty name. `None` means exit (keyword or end of input).
fn read_name(console: &mut dyn Console) -> ApplicationResult<Option<String>> {
    loop {
        let Some(line) = console
            .read_line(NAME_PROMPT)
            .with_context("read client name")?
        else {
            return Ok(None);
        };
        if line.trim().eq_ignore_ascii_case(EXIT_KEYWORD) {
            return Ok(None);
        }
        if let Some(name) = normalize_name(&line) {
            return Ok(Some(name.to_string()));
        }
    }
}

/// Read a well-formed tax id. `None` means end of input.
fn read_tax_id(console: &mut dyn Console) -> ApplicationResult<Option<TaxId>> {
    loop {
        let Some(line) = console
            .read_line(TAX_ID_PROMPT)
            .with_context("read tax id")?
        else {
            return Ok(None);
        };
        match TaxId::parse(&line) {
            Ok(tax_id) => return Ok(Some(tax_id)),
            Err(e) => {
                debug!("rejected tax id: {}", e);
                console.error("Invalid format! Use: 123.456.789-09");
            }
        }
    }
}

fn show_duplicate(console: &mut dyn Console, existing: &Client) {
    console.warning("Tax id already registered!");
    console.info(&format!(
        "Existing client:\nID: {}\nName: {}\nTax id: {}",
        existing.id,
        existing.name,
        existing.tax_id.formatted()
    ));
}

/// Present the duplicate menu until a valid choice is made.
/// `None` means end of input.
fn read_menu_choice(console: &mut dyn Console) -> ApplicationResult<Option<MenuChoice>> {
    loop {
        console.info("What would you like to do?");
        console.info("1 - Try another tax id");
        console.info("2 - Register a new client");
        console.info("3 - Exit");
        let Some(line) = console
            .read_line(MENU_PROMPT)
            .with_context("read menu option")?
        else {
            return Ok(None);
        };
        match MenuChoice::parse(&line) {
            Some(choice) => return Ok(Some(choice)),
            None => console.error("Invalid option!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(MenuChoice::RetryTaxId))]
    #[case(" 2 ", Some(MenuChoice::NewClient))]
    #[case("3", Some(MenuChoice::Exit))]
    #[case("4", None)]
    #[case("", None)]
    #[case("one", None)]
    fn given_menu_input_when_parsing_then_maps_choice(
        #[case] input: &str,
        #[case] expected: Option<MenuChoice>,
    ) {
        assert_eq!(MenuChoice::parse(input), expected);
    }
}
