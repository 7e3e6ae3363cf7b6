use clap::Parser;
use color_eyre::Result;
use std::io::{self, BufRead, IsTerminal, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jlens::analysis::{AnalysisOptions, ChartOptions, expand_fields, run_analysis};
use jlens::config::{self, Config};
use jlens::filter::PromptReader;
use jlens::input::{InputReader, Selection};
use jlens::render::{
    ConsoleRenderer, PlainRenderer, RenderOptions, Renderer, TextChartRenderer,
};
use jlens::session::{Session, SessionOptions, print_structure, report_counts};

/// Pretty prints JSONL files with optional selective output
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pretty prints JSONL files with optional selective output",
    after_help = "Example:\n  jlens dev.jsonl -n 1 -p prompt tests -r"
)]
struct Args {
    /// The file to process (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Parts to print: alias names (code, prompt, tests, ...), top-level keys,
    /// slash paths like "problem/tests", "broken_diff" or "all"
    #[arg(short, long, num_args = 1..)]
    parts: Option<Vec<String>>,

    /// Number of problems to print (defaults to all)
    #[arg(short, long, help_heading = "Line Selection")]
    number: Option<usize>,

    /// Start at this index (inclusive, 0-indexed)
    #[arg(short, long, default_value_t = 0, help_heading = "Line Selection")]
    start: usize,

    /// Only include problems that contain this string in the JSON
    #[arg(long, help_heading = "Line Selection")]
    search: Option<String>,

    /// Randomize the order of the problems
    #[arg(short, long, help_heading = "Line Selection")]
    randomize: bool,

    /// Number problems 1 to N instead of keeping their original line index
    #[arg(long, help_heading = "Line Selection")]
    renumber: bool,

    /// Print line numbers in the code blocks
    #[arg(short, long, help_heading = "Printing Options")]
    line_numbers: bool,

    /// Console width
    #[arg(short, long, help_heading = "Printing Options")]
    width: Option<usize>,

    /// Print the structure of the loaded data instead of its contents
    #[arg(long, help_heading = "Printing Options")]
    structure: bool,

    /// Annotate the structure with value ranges over the selected problems
    #[arg(long, requires = "structure", help_heading = "Printing Options")]
    ranges: bool,

    /// Print the raw JSON instead of pretty printing it (ignores --parts)
    #[arg(long, help_heading = "Printing Options")]
    raw: bool,

    /// Maximum length of printed strings
    #[arg(long, help_heading = "Printing Options")]
    max_str_len: Option<usize>,

    /// Plain output without colours (no --file-output)
    #[arg(long, help_heading = "Printing Options")]
    plain: bool,

    /// Select problems interactively with y/N/q
    #[arg(long, help_heading = "Filtering")]
    manual_filter: bool,

    /// Output file for manually selected problems (appended to)
    #[arg(long, help_heading = "Filtering")]
    filter_output: Option<PathBuf>,

    /// Save everything printed to this file; HTML when it ends in ".html"
    #[arg(long, help_heading = "Filtering")]
    file_output: Option<PathBuf>,

    /// Analyze how these fields relate to --y-value ("all" for the standard list)
    #[arg(long, num_args = 1.., help_heading = "Analysis")]
    analyze: Option<Vec<String>>,

    /// Top-level field holding the measured value
    #[arg(long, help_heading = "Analysis")]
    y_value: Option<String>,

    /// Leave out groups with fewer records than this
    #[arg(long, help_heading = "Analysis")]
    min_n: Option<usize>,

    /// Also tally the joint values of all analyzed fields
    #[arg(long, help_heading = "Analysis")]
    combine: bool,

    /// Write a text chart per analyzed field next to the input file
    #[arg(long, help_heading = "Analysis")]
    chart: bool,

    /// Give every bar in a chart its own colour
    #[arg(long, requires = "chart", help_heading = "Analysis")]
    multiple_colors: bool,

    /// Print charts to the console as well
    #[arg(long, requires = "chart", help_heading = "Analysis")]
    show_chart: bool,
}

fn main() -> Result<()> {
    // Writes to /tmp/jlens-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        if let Ok(log_file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/jlens-debug.log")
        {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .format(|buf, record| {
                    use std::time::SystemTime;
                    let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                    writeln!(
                        buf,
                        "[{}] [{}] {}",
                        datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .init();
        }

        log::debug!("=== JLENS DEBUG SESSION STARTED ===");
    }
    #[cfg(not(debug_assertions))]
    env_logger::init();

    color_eyre::install()?;

    let config_result = config::load_config();
    let args = Args::parse();
    let config = &config_result.config;

    let max_str_len = args.max_str_len.or(config.display.max_str_len);
    // Raw mode shortens each JSON string instead of the whole block
    let options = RenderOptions {
        width: args.width.unwrap_or(config.display.width),
        max_str_len: if args.raw { None } else { max_str_len },
        color: stdout().is_terminal(),
    };
    let plain = args.plain || config.display.plain;
    let mut renderer: Box<dyn Renderer> = if plain {
        Box::new(PlainRenderer::new(stdout(), options.clone()))
    } else {
        Box::new(ConsoleRenderer::new(stdout(), options.clone()))
    };

    if let Some(warning) = &config_result.warning {
        renderer.paragraph(&format!("Config warning: {}", warning))?;
    }

    run(&args, config, renderer.as_mut(), &options, max_str_len)?;

    if let Some(path) = &args.file_output {
        renderer.export(path)?;
    }

    #[cfg(debug_assertions)]
    log::debug!("=== JLENS DEBUG SESSION ENDED ===");

    Ok(())
}

fn run(
    args: &Args,
    config: &Config,
    renderer: &mut dyn Renderer,
    options: &RenderOptions,
    max_str_len: Option<usize>,
) -> Result<()> {
    let lines = InputReader::read_lines(args.file.as_deref())?;
    let total = lines.len();

    let selection = Selection {
        randomize: args.randomize,
        search: args.search.clone(),
        start: args.start,
        number: args.number,
    };
    let selected = selection.apply(lines);
    report_counts(renderer, total, &selected, args.search.is_some())?;

    let line_numbers = args.line_numbers || config.display.line_numbers;

    if let Some(requested) = &args.analyze {
        let fields = expand_fields(requested, config.analysis.params.as_deref());
        let analysis = AnalysisOptions {
            fields,
            y_field: args.y_value.clone().or_else(|| config.analysis.y_value.clone()),
            min_n: args.min_n.unwrap_or(config.analysis.min_n),
            combine: args.combine,
            chart: args.chart.then(|| ChartOptions {
                input: args.file.clone(),
                multiple_colors: args.multiple_colors,
                show: args.show_chart,
            }),
        };
        let mut charts = TextChartRenderer::new(stdout(), options.width, options.color);
        run_analysis(renderer, &mut charts, &selected.lines, &analysis)?;
        return Ok(());
    }

    if args.structure {
        print_structure(renderer, &selected.lines, args.ranges, line_numbers)?;
        return Ok(());
    }

    let filter_output = args
        .filter_output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.filter.output));
    let session_options = SessionOptions {
        parts: args.parts.clone(),
        line_numbers,
        raw: args.raw,
        max_str_len,
        renumber: args.renumber,
        filter_output: args.manual_filter.then_some(filter_output),
        source: args
            .file
            .as_ref()
            .map_or_else(|| "stdin".to_string(), |path| path.display().to_string()),
        start: args.start,
        randomized: args.randomize,
    };

    // Only the record loop can stop early; other modes keep the default
    // Ctrl-C behaviour
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            // A second Ctrl-C gives up on the summary
            if flag.swap(true, Ordering::SeqCst) {
                std::process::exit(130);
            }
        })?;
    }

    let mut answers: Box<dyn BufRead> = if session_options.filter_output.is_some() {
        Box::new(PromptReader::stdin(Arc::clone(&interrupted)))
    } else {
        Box::new(io::empty())
    };
    let outcome = Session::new(&session_options, &interrupted).run(
        renderer,
        &selected.lines,
        &mut answers,
        &mut stdout(),
    )?;
    log::debug!("Session finished: {:?}", outcome);
    Ok(())
}
