use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkshot::models::{AppConfig, ConvertParams};
use inkshot::server;
use inkshot::services::Converter;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:10000";

#[derive(Parser)]
#[command(name = "inkshot")]
#[command(about = "Inkshot - converts rendered screenshots into BMP files for e-ink displays")]
struct Cli {
    /// Configuration file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a PNG file to BMP
    Convert {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output BMP file
        #[arg(short, long)]
        output: PathBuf,

        /// Bits per pixel: 1, 2, 4, 8 or 24
        #[arg(short, long)]
        bits: Option<u16>,

        /// Palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Grayscale ramp size (2 to 256)
        #[arg(long)]
        gray: Option<usize>,

        /// Configured panel palette
        #[arg(long)]
        panel: Option<String>,

        /// Configured device profile or alias
        #[arg(short, long)]
        device: Option<String>,

        /// Dithering algorithm: none, floyd-steinberg or atkinson
        #[arg(long)]
        dither: Option<String>,

        /// Clockwise rotation in degrees: 0, 90, 180 or 270
        #[arg(short, long)]
        rotate: Option<u16>,

        /// Invert colors
        #[arg(long)]
        invert: bool,

        /// Luma cutoff for black and white output
        #[arg(long)]
        threshold: Option<u8>,

        /// Store rows top-down instead of the configured order
        #[arg(long)]
        top_down: bool,
    },
    /// List configured panels and devices
    Palettes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Serve) => run_server(config_file.as_deref()).await,
        Some(Commands::Convert {
            input,
            output,
            bits,
            colors,
            gray,
            panel,
            device,
            dither,
            rotate,
            invert,
            threshold,
            top_down,
        }) => {
            let params = ConvertParams {
                bits,
                colors,
                gray,
                panel,
                device,
                dither,
                rotate,
                // Absent flag leaves the device profile in charge
                invert: invert.then_some(true),
                threshold,
            };
            run_convert_command(config_file.as_deref(), &input, &output, &params, top_down)
        }
        Some(Commands::Palettes) => run_palettes_command(config_file.as_deref()),
        None => {
            run_status_command(config_file.as_deref());
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkshot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Convert a PNG file to a BMP file (no server needed)
fn run_convert_command(
    config_file: Option<&Path>,
    input: &Path,
    output: &Path,
    params: &ConvertParams,
    top_down: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let mut config = AppConfig::load(config_file);
    if top_down {
        config.encoder.row_order = inkshot::models::RowOrderSetting::TopDown;
    }
    let converter = Converter::new(config.into())?;

    let png = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let image = converter.convert(&png, params)?;
    std::fs::write(output, image.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;

    println!(
        "Wrote {} ({}x{}, {}-bit, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        image.depth(),
        image.len()
    );
    Ok(())
}

/// Print configured panels, devices and aliases
fn run_palettes_command(config_file: Option<&Path>) -> anyhow::Result<()> {
    init_cli_tracing();

    let converter = Converter::new(AppConfig::load(config_file).into())?;
    let config = converter.config();

    println!("Panels:");
    for name in config.panels.keys() {
        match converter.panel(name) {
            Some(palette) => {
                let colors: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
                println!("  {name:<12} {}", colors.join(" "));
                if palette.has_device_colors() {
                    let device: Vec<String> =
                        palette.device_colors().iter().map(|c| c.to_string()).collect();
                    println!("  {:<12} -> {}", "", device.join(" "));
                }
            }
            None => println!("  {name:<12} (invalid)"),
        }
    }

    println!("\nDevices:");
    if config.devices.is_empty() {
        println!("  (none)");
    }
    for (name, device) in &config.devices {
        let palette = if let Some(colors) = &device.colors {
            format!("{} colors", colors.len())
        } else if let Some(levels) = device.gray_levels {
            format!("{levels} grays")
        } else if let Some(panel) = &device.panel {
            format!("panel {panel}")
        } else {
            "no palette".to_string()
        };
        let bits = device
            .bits
            .map(|b| format!("{b}-bit"))
            .unwrap_or_else(|| "auto".to_string());
        println!(
            "  {name:<12} {bits:<7} {palette:<14} dither={}",
            device.dither.as_deref().unwrap_or("atkinson")
        );
    }

    if !config.aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in &config.aliases {
            println!("  {alias:<12} -> {target}");
        }
    }
    Ok(())
}

fn run_status_command(config_file: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    // Header
    println!("Inkshot v{VERSION}");
    println!("Converts rendered screenshots into BMP files for e-ink displays\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr
            .as_deref()
            .unwrap_or(&format!("{DEFAULT_BIND_ADDR} (default)"))
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    // Config section
    println!("\nConfiguration:");
    let source = match config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "built-in defaults (file not found)".to_string(),
        None => "built-in defaults".to_string(),
    };
    println!("  Source: {source}");

    let config = AppConfig::load(config_file);
    println!(
        "  Row order: {:?}, depths: {:?}, implicit palette: {}",
        config.encoder.row_order, config.encoder.depths, config.encoder.implicit_palette
    );
    println!(
        "  {} panels, {} devices, {} aliases",
        config.panels.len(),
        config.devices.len(),
        config.aliases.len()
    );

    // Commands section
    println!("\nCommands:");
    println!("  inkshot serve      Start the HTTP server");
    println!("  inkshot convert    Convert a PNG file to BMP");
    println!("  inkshot palettes   List configured panels and devices");
    println!("\nRun 'inkshot --help' for more options.");
}

/// Run the HTTP server
async fn run_server(config_file: Option<&Path>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkshot=info,eink_bmp=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config_source = config_file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    tracing::info!(config = %config_source, "Configuration source");

    let state = server::create_app_state(AppConfig::load(config_file))?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Inkshot server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
