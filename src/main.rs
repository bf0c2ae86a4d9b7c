use clap::{Parser, Subcommand};
use quill::config::{self, ConfigOverrides};
use quill::{build, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Static site generator for markdown blogs")]
#[command(long_about = "\
Static site generator for markdown blogs

Each markdown file in the content directory becomes a page at
<slug>/index.html. A homepage listing and sitemap.xml are generated from
all published posts, newest first.

Project structure:

  my-blog/
  ├── config.toml              # Optional, see 'quill gen-config'
  ├── content/
  │   ├── hello-world.md       # → dist/hello-world/index.html
  │   └── wip.md               # draft: true → skipped entirely
  ├── templates/
  │   ├── post.html            # {{ title }} {{ description }} {{ author }} {{ date }}
  │   │                        # {{ image }} {{ slug }} {{ readTime }} {{ content }}
  │   └── index.html           # {{ posts }}
  ├── public/                  # Copied as-is into dist/
  └── dist/                    # Output, wiped on every build

Front matter (all keys optional):

  ---
  title: Hello World
  description: First post
  author: Ada
  date: 2024-06-01
  image: /img/cover.png
  slug: hello
  draft: false
  ---")]
#[command(version)]
struct Cli {
    /// Project root (where config.toml lives; relative paths resolve here)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Markdown content directory
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Template directory (post.html, index.html)
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Static asset directory
    #[arg(long, global = true)]
    public_dir: Option<PathBuf>,

    /// Output directory (removed and recreated on build)
    #[arg(long, global = true)]
    dist_dir: Option<PathBuf>,

    /// Public site URL used in the sitemap
    #[arg(long, global = true)]
    site_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory
    Build,
    /// Validate posts and templates without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            content_dir: self.content_dir.clone(),
            template_dir: self.template_dir.clone(),
            public_dir: self.public_dir.clone(),
            dist_dir: self.dist_dir.clone(),
            site_url: self.site_url.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.root, cli.overrides())?.rooted_at(&cli.root);
            println!("==> Building {}", site.content_dir.display());
            let report = build::build(&site, chrono::Utc::now())?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let site = config::load_config(&cli.root, cli.overrides())?.rooted_at(&cli.root);
            println!("==> Checking {}", site.content_dir.display());
            let report = build::check(&site)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
