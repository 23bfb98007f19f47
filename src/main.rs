//! # people-admin
//!
//! Command-line front end for the people administration backend. Every
//! subcommand drives the same screens and stores a graphical front end would.

use clap::{Parser, Subcommand};
use people_admin::config::AppConfig;
use people_admin::lifecycle::{setup_tracing, AdminApp};
use people_admin::model::{CityId, PersonId};
use people_admin::navigation::{Navigator, NEW_PERSON_SEGMENT};
use people_admin::screens::details::{DetailsHandle, DetailsView, ScreenState};
use people_admin::screens::ConsoleDialogs;
use std::sync::Arc;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(name = "people-admin")]
#[command(about = "Manage people records from the terminal")]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Accept every confirmation without asking
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one person
    Show { id: u64 },
    /// List people, one page at a time
    List {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Only names containing this text
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Create a person
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        city: Option<u64>,
        /// Go back to the list after saving
        #[arg(long)]
        close: bool,
    },
    /// Change fields of an existing person
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        city: Option<u64>,
        #[arg(long)]
        close: bool,
    },
    /// Delete a person after confirmation
    Delete { id: u64 },
    /// Print the side menu
    Menu {
        /// Switch the theme before printing
        #[arg(long)]
        toggle_theme: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let dialogs = ConsoleDialogs::new(cli.yes);
    let mut app =
        AdminApp::start(&cli.config, Arc::new(dialogs.clone())).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("command");
    let result = run(&mut app, &dialogs, cli.command).instrument(span).await;

    app.shutdown().await?;
    result
}

async fn run(
    app: &mut AdminApp,
    dialogs: &ConsoleDialogs,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::Show { id } => {
            let screen = app.open_details(&PersonId(id).to_string());
            print_view(&loaded(&screen, id).await?);
        }
        Command::List { page, filter } => {
            let result = app
                .people()
                .get_all(page, &filter)
                .await
                .map_err(|e| e.to_string())?;
            for person in &result.items {
                println!(
                    "{:>5}  {:<30}  {:<30}  city {}",
                    person.id, person.complete_name, person.email, person.city_id
                );
            }
            println!("page {page}, {} record(s) in total", result.total_count);
        }
        Command::Create {
            name,
            email,
            city,
            close,
        } => {
            let screen = app.open_details(NEW_PERSON_SEGMENT);
            settled(&screen).await?;
            screen.edit_name(name).await.map_err(to_string)?;
            screen.edit_email(email).await.map_err(to_string)?;
            screen.edit_city(city.map(CityId)).await.map_err(to_string)?;
            submit(app, dialogs, &screen, close).await?;
        }
        Command::Update {
            id,
            name,
            email,
            city,
            close,
        } => {
            let screen = app.open_details(&id.to_string());
            loaded(&screen, id).await?;
            if let Some(name) = name {
                screen.edit_name(name).await.map_err(to_string)?;
            }
            if let Some(email) = email {
                screen.edit_email(email).await.map_err(to_string)?;
            }
            if let Some(city) = city {
                screen.edit_city(Some(CityId(city))).await.map_err(to_string)?;
            }
            submit(app, dialogs, &screen, close).await?;
        }
        Command::Delete { id } => {
            let screen = app.open_details(&id.to_string());
            loaded(&screen, id).await?;
            let alerts = dialogs.alert_count();
            screen.delete().await.map_err(to_string)?;
            let view = settled(&screen).await?;
            if view.state != ScreenState::Closed && dialogs.alert_count() > alerts {
                return Err(format!("could not delete record {id}"));
            }
        }
        Command::Menu { toggle_theme } => {
            let menu = app.menu();
            if toggle_theme {
                menu.toggle_theme().await.map_err(to_string)?;
            }
            let view = menu.view(app.viewport());
            println!("drawer: {:?}, open: {}", view.variant, view.is_open);
            for item in &view.items {
                let marker = if item.active { ">" } else { " " };
                println!("{marker} {:<10} {}", item.option.label, item.option.path);
            }
            println!("  [{}] [{}]", view.theme_toggle_label, view.logout_label);
        }
    }
    Ok(())
}

async fn submit(
    app: &AdminApp,
    dialogs: &ConsoleDialogs,
    screen: &DetailsHandle,
    close: bool,
) -> Result<(), String> {
    let alerts = dialogs.alert_count();
    let view = if close {
        screen.save_and_close().await
    } else {
        screen.save().await
    }
    .map_err(to_string)?;

    if !view.errors.is_empty() {
        for (field, message) in &view.errors {
            eprintln!("{field}: {message}");
        }
        return Err("validation failed".to_string());
    }

    let view = settled(screen).await?;
    if view.state != ScreenState::Closed && dialogs.alert_count() > alerts {
        return Err("save failed".to_string());
    }
    info!(location = %app.router.location(), "Save finished");
    if view.state != ScreenState::Closed {
        print_view(&view);
    }
    Ok(())
}

/// Waits for the record to load. A screen that closes instead has already
/// alerted the reason.
async fn loaded(screen: &DetailsHandle, id: u64) -> Result<DetailsView, String> {
    let view = settled(screen).await?;
    if view.state == ScreenState::Closed {
        return Err(format!("could not load record {id}"));
    }
    Ok(view)
}

/// Waits until no request is in flight.
async fn settled(screen: &DetailsHandle) -> Result<DetailsView, String> {
    screen
        .wait_for(|v| v.state == ScreenState::Closed || (!v.busy && !v.is_loading))
        .await
        .map_err(to_string)
}

fn print_view(view: &DetailsView) {
    println!("{}", view.title);
    println!("  name:  {}", view.draft.complete_name);
    println!("  email: {}", view.draft.email);
    match view.draft.city_id {
        Some(city) => println!("  city:  {city}"),
        None => println!("  city:  -"),
    }
}

fn to_string(e: impl std::fmt::Display) -> String {
    e.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use people_admin::api::{Method, PeopleService};
    use people_admin::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_list_rejects_page_zero() {
        assert!(Cli::try_parse_from(["people-admin", "list", "--page", "0"]).is_err());

        let cli = Cli::try_parse_from(["people-admin", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_failed_load_and_failed_save_are_errors() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/people/9").fail_network();
        mock.expect(Method::Get, "/people/2").respond_ok(json!({
            "id": 2, "completeName": "Grace Hopper", "email": "grace@navy.mil", "cityId": 8
        }));
        mock.expect(Method::Put, "/people/2").respond_status(500);
        let dialogs = ConsoleDialogs::new(true);
        let mut app = AdminApp::with_people(
            &AppConfig::default(),
            Arc::new(PeopleService::new(mock.clone())),
            Arc::new(dialogs.clone()),
        );

        let missing = app.open_details("9");
        assert!(loaded(&missing, 9).await.is_err());

        let screen = app.open_details("2");
        loaded(&screen, 2).await.unwrap();
        let result = submit(&app, &dialogs, &screen, false).await;
        assert_eq!(result, Err("save failed".to_string()));
        assert_eq!(dialogs.alert_count(), 2);

        app.shutdown().await.unwrap();
        mock.verify();
    }
}
