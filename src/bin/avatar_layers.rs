use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use avatar_layers::{AvatarGenerator, AvatarProfile, Gender, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "avatar-layers", version, about = "Avatar generator")]
struct Cli {
    /// Root directory of the layer assets.
    #[arg(long, global = true, env = "AVATAR_ASSETS", default_value = "data")]
    assets: PathBuf,

    /// Log layer selection and compositing.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an avatar and write it to a file.
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// Print the layer selection as a JSON profile.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// male|m or female|f.
    gender: Gender,

    /// Output file name.
    #[arg(short, long, default_value = "avatar.png")]
    output: PathBuf,

    /// Generate the stable avatar for this username instead of a random one.
    #[arg(short, long)]
    username: Option<String>,

    /// Output format (png, jpeg, gif). Defaults to the output file extension.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// JPEG quality, 1-100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// male|m or female|f.
    gender: Gender,

    /// Username to derive the selection from.
    #[arg(short, long)]
    username: String,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let generator = AvatarGenerator::from_dir(&cli.assets)
        .with_context(|| format!("load assets from {}", cli.assets.display()))?;

    match cli.cmd {
        Command::Generate(args) => generate(&generator, args),
        Command::Inspect(args) => inspect(&generator, args),
    }
}

fn generate(generator: &AvatarGenerator, args: GenerateArgs) -> anyhow::Result<()> {
    let mut format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    if let (OutputFormat::Jpeg { quality }, Some(requested)) = (&mut format, args.quality) {
        *quality = requested;
    }

    let avatar = match &args.username {
        Some(name) => generator.generate_for_identity(args.gender, name),
        None => generator.generate(args.gender),
    }
    .context("generate avatar")?;

    generator
        .save_as(&avatar, &args.output, format)
        .with_context(|| format!("write {}", args.output.display()))?;

    tracing::info!(output = %args.output.display(), %format, "avatar written");
    Ok(())
}

fn inspect(generator: &AvatarGenerator, args: InspectArgs) -> anyhow::Result<()> {
    let selection = generator.select_for_identity(args.gender, &args.username);
    let profile = AvatarProfile::from(&selection);
    println!("{}", profile.to_json_pretty().context("serialize profile")?);
    for layer in selection.layers() {
        eprintln!("{:>10}  {}", layer.category.to_string(), layer.asset);
    }
    Ok(())
}
