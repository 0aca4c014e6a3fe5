use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_sheets::{ImposeOptions, SheetPlan, constants::OUTPUT_FILE_NAME};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-sheets", about = "Impose PDF pages two-up onto 17x11 sheets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF into two-up sheets
    Convert {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, default_value = OUTPUT_FILE_NAME)]
        output: PathBuf,

        /// JSON options file (flags below override it)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Scaling mode
        #[arg(long, value_enum)]
        scaling: Option<ScalingArg>,

        /// Show the sheet plan only, don't generate PDF
        #[arg(long)]
        plan_only: bool,
    },

    /// Print the sheet plan for a page count
    Plan {
        /// Number of source pages
        pages: usize,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write the default options as JSON
    InitConfig {
        /// Output JSON file
        output: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Page pairing rule
    #[arg(long, value_enum)]
    pairing: Option<PairingArg>,

    /// Accept any even page count instead of exactly 4
    #[arg(long)]
    any_page_count: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PairingArg {
    Booklet,
    Fold,
    Sequential,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Stretch,
    Fit,
    None,
}

impl From<PairingArg> for pdf_sheets::Pairing {
    fn from(arg: PairingArg) -> Self {
        match arg {
            PairingArg::Booklet => Self::Booklet,
            PairingArg::Fold => Self::Fold,
            PairingArg::Sequential => Self::Sequential,
        }
    }
}

impl From<ScalingArg> for pdf_sheets::ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Stretch => Self::Stretch,
            ScalingArg::Fit => Self::Fit,
            ScalingArg::None => Self::None,
        }
    }
}

impl LayoutArgs {
    fn apply(&self, options: &mut ImposeOptions) {
        if let Some(pairing) = self.pairing {
            options.pairing = pairing.into();
        }
        if self.any_page_count {
            options.required_pages = None;
        }
    }
}

fn print_plan(plan: &SheetPlan) {
    println!("Sheet plan ({} source pages):", plan.source_pages);
    for (idx, sheet) in plan.iter().enumerate() {
        println!(
            "  Sheet {}: left = page {}, right = page {} ({} x {} pt)",
            idx + 1,
            sheet.left_page_index + 1,
            sheet.right_page_index + 1,
            sheet.sheet_width_pt,
            sheet.sheet_height_pt
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            layout,
            scaling,
            plan_only,
        } => {
            let mut options = match &config {
                Some(path) => ImposeOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => ImposeOptions::default(),
            };
            layout.apply(&mut options);
            if let Some(scaling) = scaling {
                options.scaling = scaling.into();
            }
            options.validate()?;

            let source = pdf_sheets::load_pdf(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;

            // Fails on a bad page count before anything is embedded
            let plan = pdf_sheets::plan_sheets(source.get_pages().len(), &options)?;
            print_plan(&plan);

            if plan_only {
                return Ok(());
            }

            let imposed = pdf_sheets::impose(&source, &options).await?;
            pdf_sheets::save_pdf(imposed, &output).await?;
            println!("Imposed → {}", output.display());
        }

        Commands::Plan { pages, layout } => {
            let mut options = ImposeOptions::default();
            layout.apply(&mut options);

            let plan = pdf_sheets::plan_sheets(pages, &options)?;
            print_plan(&plan);
        }

        Commands::InitConfig { output } => {
            ImposeOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}
