use std::{
    env,
    fs::read_to_string,
    io::{self, Read},
    process::ExitCode,
    time::Instant,
};

use stella_checker::{check_source, display_error};

fn read_source(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) if path != "-" => read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [<file.st> | -]", args[0]);
        eprintln!("\nReads the program from stdin when no file (or `-`) is given.");
        return ExitCode::FAILURE;
    }

    let file_path = args.get(1).map(String::as_str);
    let file_name = match file_path {
        Some(path) if path != "-" => path.rsplit('/').next().unwrap_or(path).to_string(),
        _ => String::from("<stdin>"),
    };

    let source = match read_source(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error reading {}: {}", file_name, error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let result = check_source(&source, Some(file_name.clone()));
    log::info!("checked {} in {:?}", file_name, start.elapsed());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", display_error(&error, &source, &file_name));
            ExitCode::FAILURE
        }
    }
}
