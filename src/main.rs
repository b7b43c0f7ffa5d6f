use clap::{Parser, Subcommand, ValueEnum};
use sizeset::attributes::{Loading, RenderArgs, Rendered, ReturnFormat};
use sizeset::config::{self, EngineConfig, RegistryCache};
use sizeset::engine::Engine;
use sizeset::imaging::UrlBackend;
use sizeset::media::{self, MemoryLibrary};
use sizeset::output;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "sizeset")]
#[command(about = "Responsive image attributes from named image sizes")]
#[command(long_about = "\
Responsive image attributes from named image sizes

Sizes are configured once in a TOML file and referenced by key. Originals
come from a JSON library of attachments. Every command prints what a
template would render for an attachment at a size.

  sizes.toml                 # [sizes.<key>] tables, see gen-config
  library.json               # [{\"id\": 7, \"url\": ..., \"width\": ..., ...}]

Generated variants are named after their request:

  test.jpg  →  test-560x0-c-default.jpg, test-1400x0-c-default.webp

Run 'sizeset gen-config' to generate a documented sizes.toml.")]
#[command(version)]
struct Cli {
    /// Size configuration file
    #[arg(long, default_value = "sizes.toml", global = true)]
    config: PathBuf,

    /// Attachment library (JSON)
    #[arg(long, default_value = "library.json", global = true)]
    library: PathBuf,

    /// Log resize requests and other details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    String,
    Array,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lazy {
    Srcset,
    Src,
    Sizes,
}

/// Rendering options shared by `attrs` and `picture`.
#[derive(clap::Args, Clone)]
struct RenderFlags {
    /// Omit the width attribute
    #[arg(long)]
    no_width: bool,

    /// Omit the height attribute
    #[arg(long)]
    no_height: bool,

    /// Attributes to emit with a data- prefix for lazy-loading scripts
    #[arg(long, value_enum, value_delimiter = ',')]
    lazy: Vec<Lazy>,

    /// Value of the loading attribute: lazy, eager, auto or off
    #[arg(long, default_value = "lazy", value_parser = parse_loading)]
    loading: Loading,

    /// Leave out the fallback src next to a srcset
    #[arg(long)]
    no_src_default: bool,
}

impl RenderFlags {
    fn args(&self) -> RenderArgs {
        RenderArgs {
            attr_width: !self.no_width,
            attr_height: !self.no_height,
            lazy_srcset: self.lazy.iter().any(|l| matches!(l, Lazy::Srcset)),
            lazy_src: self.lazy.iter().any(|l| matches!(l, Lazy::Src)),
            lazy_sizes: self.lazy.iter().any(|l| matches!(l, Lazy::Sizes)),
            loading: self.loading,
            src_default: !self.no_src_default,
            ..RenderArgs::default()
        }
    }
}

fn parse_loading(value: &str) -> Result<Loading, String> {
    Loading::parse(value).ok_or_else(|| format!("unknown loading value `{value}`"))
}

#[derive(Subcommand)]
enum Command {
    /// Print the <img> attributes of an attachment at a size
    Attrs {
        id: u64,
        size: String,
        /// Print a rendered attribute string or a JSON map
        #[arg(long, value_enum, default_value = "string")]
        format: Format,
        /// Use WebP variants if the size converts to WebP
        #[arg(long)]
        webp: bool,
        #[command(flatten)]
        render: RenderFlags,
    },
    /// Print the inner markup of a <picture> element
    Picture {
        id: u64,
        size: String,
        /// Attachment shown in dark colour schemes
        #[arg(long)]
        dark: Option<u64>,
        #[command(flatten)]
        render: RenderFlags,
    },
    /// Print the srcset value of an attachment at a size
    Srcset { id: u64, size: String },
    /// Make the images in an HTML file responsive and print the result
    Rewrite { file: PathBuf },
    /// Request every configured size of an attachment, as done on upload
    Generate { id: u64 },
    /// Validate the configuration (and the library, if present)
    Check,
    /// Print a stock sizes.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(
    config: Arc<EngineConfig>,
    library: &std::path::Path,
) -> Result<Engine<MemoryLibrary, UrlBackend>, Box<dyn std::error::Error>> {
    let library = media::load_library(library, &UrlBackend)?;
    Ok(Engine::new(config, library, UrlBackend))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let load_config = || RegistryCache::new(&cli.config).get();

    match cli.command {
        Command::Attrs {
            id,
            size,
            format,
            webp,
            render,
        } => {
            let engine = build_engine(load_config()?, &cli.library)?;
            let args = RenderArgs {
                webp,
                return_format: match format {
                    Format::String => ReturnFormat::String,
                    Format::Array => ReturnFormat::Array,
                },
                ..render.args()
            };
            match engine.render(id, &size, &args) {
                Some(Rendered::Html(html)) => println!("<img{}>", html),
                Some(Rendered::Map(map)) => println!("{}", serde_json::to_string_pretty(&map)?),
                None => return Err(format!("could not render attachment {id} at `{size}`").into()),
            }
        }
        Command::Picture {
            id,
            size,
            dark,
            render,
        } => {
            let engine = build_engine(load_config()?, &cli.library)?;
            let markup = engine
                .picture(id, &size, dark, &render.args())
                .ok_or_else(|| format!("could not render attachment {id} at `{size}`"))?;
            println!("<picture>\n{}\n</picture>", markup);
        }
        Command::Srcset { id, size } => {
            let engine = build_engine(load_config()?, &cli.library)?;
            match engine.srcset(id, &size) {
                Some(srcset) => println!("{}", srcset),
                None => {
                    let src = engine
                        .src(id, &size)
                        .ok_or_else(|| format!("could not resolve attachment {id} at `{size}`"))?;
                    println!("{}", src);
                }
            }
        }
        Command::Rewrite { file } => {
            let engine = build_engine(load_config()?, &cli.library)?;
            let html = std::fs::read_to_string(&file)?;
            print!("{}", engine.rewrite_content(&html));
        }
        Command::Generate { id } => {
            let engine = build_engine(load_config()?, &cli.library)?;
            let variants = engine.generate_sizes(id)?;
            output::print_generate_output(id, &variants);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let config = load_config()?;
            let attachments = if cli.library.exists() {
                Some(media::load_library(&cli.library, &UrlBackend)?.len())
            } else {
                None
            };
            output::print_check_output(&config, attachments);
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
