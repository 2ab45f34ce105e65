use clap::Parser;
use modelexport::{Cli, ExportError, ModelExport, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create ModelExport instance
    let app = match ModelExport::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.list_fields {
        return handle_list_fields(&app);
    }

    if cli.dry_run {
        return handle_dry_run(&cli, &app);
    }

    let request = match cli.build_request(app.config()) {
        Some(request) => request,
        None => {
            app.output_formatter().error("No input file provided");
            return 1;
        }
    };

    match app.run_export(&request) {
        Ok(_manifest) => 0,
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ExportError) -> i32 {
    match error {
        ExportError::InputFormat { .. } => 2,
        ExportError::Selection { .. } => 3,
        ExportError::Config { .. } => 4,
        ExportError::Io(_) => 5,
        ExportError::Render { .. } => 6,
        ExportError::Permission { .. } => 7,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "modelexport.toml".to_string());

    match ModelExport::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  modelexport <input.json> --config {}", config_path);
            println!("\nEdit the file to customize fields, filter terms and output location.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_list_fields(app: &ModelExport) -> i32 {
    let fields = &app.config().fields;

    println!("Available fields (* = exported by default):\n");
    for category in fields.categories() {
        println!("{}:", category);
        for spec in fields.catalog.iter().filter(|s| s.category == category) {
            let marker = if spec.default { "*" } else { " " };
            println!("  {} {:<35} {}", marker, spec.path, spec.label);
        }
        println!();
    }

    0
}

fn handle_dry_run(cli: &Cli, app: &ModelExport) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let input = match &cli.input {
        Some(input) => input,
        None => {
            formatter.error("No input file provided");
            return 1;
        }
    };

    if input.is_file() {
        formatter.success(&format!("Input file exists: {}", input.display()));
    } else {
        formatter.error(&format!("Input file not found: {}", input.display()));
        return 1;
    }

    let config = app.config();
    let selection = cli.selection(config);

    formatter.info("Export plan:");
    println!("  Fields:           {}", selection.join(", "));
    println!(
        "  Formats:          {}",
        cli.format
            .to_formats()
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Personal filter:  {}", !cli.no_filter);
    if !cli.no_filter {
        println!(
            "  Filter terms:     {}",
            config.filter.personal_terms.join(", ")
        );
    }
    println!(
        "  Base directory:   {}",
        config.output.base_directory.display()
    );

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the export");

    0
}

fn print_startup_error(error: &ExportError) {
    // Basic formatter for errors raised before the app exists
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
