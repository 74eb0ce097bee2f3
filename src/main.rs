use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use inkframe::Config;
use inkframe::dither::FileImageSource;
use inkframe::draw::{BitmapFontSet, DrawOutcome, Frame, PaintResources, PangoRasterizer};
use inkframe::protocol::{Payload, UpdatePacket, UpdateProtocol};
use inkframe::widgets::{self, ClockWidget, ForecastStrip, PhotoWidget};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("INKFRAME_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "inkframe")]
#[command(version = VERSION, about = "1-bit dashboard renderer for e-paper displays")]
struct Cli {
    /// Config file to use instead of ~/.config/inkframe/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the documented example config and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    /// Decode an update packet file and print its header
    #[arg(long, value_name = "PACKET")]
    inspect: Option<PathBuf>,

    /// Client identifier the update packet is built for
    #[arg(long, default_value = "default")]
    client: String,

    /// Write a PNG preview of the rendered frame
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Write the packed 1-bit frame
    #[arg(long, value_name = "PATH")]
    frame_out: Option<PathBuf>,

    /// Write the update packet for --client
    #[arg(long, value_name = "PATH")]
    packet: Option<PathBuf>,

    /// Packed frame the client currently shows (enables partial updates)
    #[arg(long, value_name = "PATH", requires = "packet")]
    previous: Option<PathBuf>,

    /// PNG shown in the photo panel
    #[arg(long, value_name = "PNG")]
    image: Option<PathBuf>,

    /// Text shown instead of the current time
    #[arg(long)]
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote example config to {}", path.display());
        return Ok(());
    }

    if let Some(path) = &cli.inspect {
        return inspect(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let frame = render(&cli, &config).await?;
    let packed = frame.export_packed();
    println!(
        "Rendered {}x{} frame ({} bytes)",
        frame.width(),
        frame.height(),
        packed.len()
    );

    if let Some(path) = cli.preview.as_ref().or(config.output.preview_path.as_ref()) {
        frame
            .write_preview(path)
            .with_context(|| format!("Failed to write preview to {}", path.display()))?;
    }

    if let Some(path) = &cli.frame_out {
        fs::write(path, &packed)
            .with_context(|| format!("Failed to write frame to {}", path.display()))?;
    }

    if let Some(path) = &cli.packet {
        let protocol = UpdateProtocol::new(config.protocol_settings(), config.sleep_schedule());
        let now = chrono::Local::now().naive_local();
        if let Some(previous) = &cli.previous {
            let bytes = fs::read(previous)
                .with_context(|| format!("Failed to read previous frame {}", previous.display()))?;
            protocol
                .seed(&cli.client, &bytes, now)
                .await
                .context("Previous frame does not match the display size")?;
        }
        let update = protocol.build_update(&cli.client, &packed, now).await?;
        fs::write(path, &update.bytes)
            .with_context(|| format!("Failed to write packet to {}", path.display()))?;
        println!(
            "Packet for '{}': {:?}, {} bytes",
            cli.client,
            update.opcode(),
            update.bytes.len()
        );
    }

    Ok(())
}

async fn render(cli: &Cli, config: &Config) -> Result<Frame> {
    let mut resources = PaintResources::new(Arc::new(PangoRasterizer::new()));
    resources.font = config.font_descriptor();
    resources.text_threshold = config.text.threshold;
    if let Some(dir) = &config.text.bitmap_font_dir {
        resources = resources.with_bitmap_fonts(BitmapFontSet::load_dir(dir)?);
    }

    let clock = match &cli.text {
        Some(text) => ClockWidget::with_text(text.clone()),
        None => ClockWidget::new(chrono::Local::now().time()),
    };
    let photo = cli.image.as_ref().map(|path| {
        PhotoWidget::new(
            Arc::new(FileImageSource::new(path)),
            config.dither_options(),
        )
    });

    let (width, height) = (config.display.width, config.display.height);
    let placements = widgets::dashboard(
        width as i32,
        height as i32,
        clock,
        photo,
        ForecastStrip::sample(),
    );

    let mut frame = Frame::new(width, height, resources);
    let outcomes = widgets::render_all(&mut frame, &placements).await;
    let contained = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, DrawOutcome::Contained(_)))
        .count();
    if contained > 0 {
        log::warn!("{} widget(s) failed and show a placeholder", contained);
    }
    Ok(frame)
}

fn inspect(path: &Path) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read packet {}", path.display()))?;
    let packet = UpdatePacket::decode(&bytes)
        .with_context(|| format!("Failed to decode packet {}", path.display()))?;

    println!("opcode: {:?}", packet.opcode());
    println!("sleep: {} min", packet.sleep_minutes);
    match &packet.payload {
        Payload::NoOp => {}
        Payload::Full(frame) => println!("frame: {} bytes", frame.len()),
        Payload::Partial {
            bounds,
            previous,
            region,
        } => {
            println!(
                "bounds: x={} y={} w={} h={}",
                bounds.x, bounds.y, bounds.width, bounds.height
            );
            println!("previous: {} bytes", previous.len());
            println!("region: {} bytes", region.len());
        }
    }
    Ok(())
}
