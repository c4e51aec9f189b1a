use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::Result;
use clap::Parser;
use client_core::{classify::friendly_hint, ControllerState, QueryController, QuerySurface};

#[derive(Parser, Debug)]
#[command(name = "clima", about = "Consultor del Clima - cliente de terminal")]
struct Args {
    /// Dirección base del servicio de clima.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Consulta única; sin ella se abre el modo interactivo.
    #[arg(long)]
    ciudad: Option<String>,
}

struct TerminalSurface {
    busy: AtomicBool,
}

impl TerminalSurface {
    fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    fn action_label(&self) -> &'static str {
        if self.busy.load(Ordering::SeqCst) {
            "Consultando..."
        } else {
            "Consultar clima"
        }
    }
}

impl QuerySurface for TerminalSurface {
    fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    fn show_loading(&self) {
        println!("Consultando clima...");
    }

    fn show_success(&self, message: &str) {
        println!("{message}");
    }

    fn show_error(&self, message: &str) {
        println!("❌ {message}");
        if let Some(hint) = friendly_hint(message) {
            println!("   {hint}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let controller = QueryController::new(args.server_url, TerminalSurface::new());

    if let Some(ciudad) = args.ciudad {
        controller.submit_query(&ciudad).await;
        if matches!(controller.state().await, ControllerState::Error(_)) {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("Consultor del Clima (escribe 'salir' para terminar)");
    let stdin = io::stdin();
    loop {
        print!("[{}] Ciudad: ", controller.surface().action_label());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.trim().eq_ignore_ascii_case("salir") {
            break;
        }

        controller.submit_query(input).await;
        println!();
    }

    Ok(())
}
