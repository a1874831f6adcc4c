#![warn(missing_docs)]
//! # klass-access-app binary
//!
//! Interactive console shell for the klass-access form controller: a
//! line-oriented command loop standing in for the mobile screen, useful for
//! manual testing and host integration demos.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use klass_access_app::{
    BYPASS_KEY_DIGEST_HEX, EventSink, FormController, RegistrationEvent, SocialProvider,
    app_version, bypass_enabled_from_env, demo_latency_from_env, redact_sensitive,
};
use klass_access_auth::{BypassGate, DemoCredentialBackend, Session};
use klass_access_store::FileProfileStore;
use klass_access_ui::{OverlayState, StageStatus};
use log::info;

fn main() {
    env_logger::init();

    if let Err(error) = run_shell() {
        eprintln!("failed to run klass-access shell: {error}");
        std::process::exit(1);
    }
}

/// Prints host events to stdout, standing in for app navigation.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn on_login(&self, session: &Session) {
        println!(
            "event: login email={} admin={} bypass={} session_id={}",
            session.email, session.admin, session.bypass, session.session_id
        );
    }

    fn on_register(&self, registration: &RegistrationEvent) {
        println!("event: register email={}", registration.email);
    }
}

fn run_shell() -> Result<(), String> {
    let gate = if bypass_enabled_from_env() {
        BypassGate::with_key_digest(BYPASS_KEY_DIGEST_HEX)
    } else {
        BypassGate::disabled()
    };
    info!(
        "bootstrap: version={} bypass_enabled={}",
        app_version(),
        gate.is_enabled()
    );

    let backend = Arc::new(DemoCredentialBackend::with_latency(demo_latency_from_env()));
    let store = Arc::new(FileProfileStore::new(profile_path()?));
    let mut controller = FormController::new(backend, store, Arc::new(ConsoleSink), gate);

    println!("klass-access {} (type 'help' for commands)", app_version());
    print_status(&controller);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|error| error.to_string())?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|error| error.to_string())?;
        if read == 0 {
            break;
        }

        let now = unix_timestamp_millis();
        controller.on_tick(now);

        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "status" => print_status(&controller),
            "mode" => {
                controller.toggle_mode();
                print_status(&controller);
            }
            "email" => controller.set_email(rest),
            "password" => controller.set_password(rest),
            "confirm" => controller.set_confirm_password(rest),
            "remember" => controller.set_remember(rest.eq_ignore_ascii_case("on")),
            "demo" => controller.use_demo_credentials(),
            "tap" => {
                let phase = controller.record_logo_tap(now);
                println!("tap: {phase:?}");
            }
            "key" => controller.set_bypass_key(rest),
            "bypass" => match controller.submit_bypass_key(now) {
                Ok(session) => println!("bypass granted: session_id={}", session.session_id),
                Err(error) => println!("bypass failed: {error}"),
            },
            "cancel" => controller.cancel_bypass(),
            "submit" => match controller.submit(now) {
                Ok(outcome) => println!("submit ok: {outcome:?}"),
                Err(error) => println!("submit failed: {error}"),
            },
            "forgot" => match controller.request_password_reset() {
                Ok(email) => println!("reset link sent to {email}"),
                Err(error) => println!("reset failed: {error}"),
            },
            "social" => match parse_provider(rest) {
                Some(provider) => {
                    if let Err(error) = controller.social_login(provider) {
                        println!("social login failed: {error}");
                    }
                }
                None => println!("unknown provider: {rest}"),
            },
            "quit" | "exit" => break,
            _ => println!("unknown command: {}", redact_sensitive(line)),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  email <text> | password <text> | confirm <text>");
    println!("  remember on|off | demo | mode | submit | forgot");
    println!("  tap | key <text> | bypass | cancel");
    println!("  social google|facebook|apple|twitter");
    println!("  status | help | quit");
}

fn print_status(controller: &FormController) {
    let ui = controller.ui();
    let overlay = match ui.overlay {
        OverlayState::Hidden => "hidden",
        OverlayState::Armed => "armed",
    };
    let submit = match ui.submit {
        StageStatus::Idle => "idle",
        StageStatus::Pending => "pending",
        StageStatus::Granted => "granted",
        StageStatus::Rejected => "rejected",
    };

    println!(
        "mode: {:?} | overlay: {overlay} | submit: {submit} | taps: {}",
        ui.mode,
        controller.tap_count()
    );
    println!(
        "email: {:?} | remember: {} | saved: {:?}",
        controller.form().email,
        controller.form().remember_email,
        ui.remembered_email
    );
    println!(
        "strength: {}/5 ({}) | errors: email={} password={} confirm={}",
        ui.strength.score,
        ui.strength.label.as_str(),
        ui.field_errors.email,
        ui.field_errors.password,
        ui.field_errors.confirm
    );
    println!("status: {}", ui.status_line);
}

fn parse_provider(raw: &str) -> Option<SocialProvider> {
    match raw.to_ascii_lowercase().as_str() {
        "google" => Some(SocialProvider::Google),
        "facebook" => Some(SocialProvider::Facebook),
        "apple" => Some(SocialProvider::Apple),
        "twitter" => Some(SocialProvider::Twitter),
        _ => None,
    }
}

fn profile_path() -> Result<PathBuf, String> {
    let exe_path = std::env::current_exe()
        .map_err(|error| format!("failed to resolve executable path: {error}"))?;
    let exe_dir = exe_path
        .parent()
        .ok_or_else(|| "failed to resolve executable directory".to_string())?;
    Ok(exe_dir.join("klass-access-profile.json"))
}

fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}
