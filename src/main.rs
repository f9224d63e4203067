use std::path::PathBuf;
use std::process;

use clap::Parser;
use compliance_report::{
    AnalysisReport, Error, FontSource, ReportOptions, Theme, TrueTypeFace, TrueTypeFamily,
    generate_report,
};

/// Render a contract analysis result (JSON) as a paginated PDF report.
#[derive(Parser, Debug)]
#[command(name = "compliance-report", version, about)]
struct Args {
    /// Analysis result as JSON
    input: PathBuf,

    /// Output path; defaults to the derived report filename
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout preset: classic or dashboard
    #[arg(long, default_value = "dashboard")]
    theme: String,

    /// TrueType font to embed instead of the built-in Helvetica
    #[arg(long, value_name = "REGULAR.ttf")]
    font: Option<PathBuf>,

    #[arg(long, value_name = "BOLD.ttf", requires = "font")]
    bold_font: Option<PathBuf>,

    #[arg(long, value_name = "ITALIC.ttf", requires = "font")]
    italic_font: Option<PathBuf>,

    /// Product name shown in the header and used in the filename
    #[arg(long)]
    product: Option<String>,

    /// Currency symbol for the financial exposure figure
    #[arg(long)]
    currency: Option<String>,
}

fn load_fonts(args: &Args) -> Result<FontSource, Error> {
    let Some(regular) = &args.font else {
        return Ok(FontSource::Standard);
    };
    // Weights without their own file are drawn with the regular face.
    let bold = args.bold_font.as_ref().unwrap_or(regular);
    let italic = args.italic_font.as_ref().unwrap_or(regular);
    let family = TrueTypeFamily::new(TrueTypeFace::from_file(regular)?)
        .with_bold(TrueTypeFace::from_file(bold)?)
        .with_italic(TrueTypeFace::from_file(italic)?);
    Ok(FontSource::truetype(family))
}

fn run(args: Args) -> Result<PathBuf, Error> {
    let theme = Theme::by_name(&args.theme)
        .ok_or_else(|| Error::InvalidTheme(format!("unknown theme {:?}", args.theme)))?;
    let mut options = ReportOptions {
        theme,
        ..ReportOptions::default()
    };
    if let Some(product) = &args.product {
        options.product_name = product.clone();
    }
    if let Some(currency) = &args.currency {
        options.currency_symbol = currency.clone();
    }

    let fonts = load_fonts(&args)?;
    let json = std::fs::read_to_string(&args.input)?;
    let report = AnalysisReport::from_json(&json)?;
    let generated = generate_report(&report, &options, &fonts)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&generated.filename));
    std::fs::write(&output, &generated.bytes)?;
    log::info!(
        "Wrote {} ({} pages)",
        output.display(),
        generated.page_count
    );
    Ok(output)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(output) => println!("{}", output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
