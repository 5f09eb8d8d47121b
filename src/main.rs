use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use unionfs_efs::config::{self, parse_size, BranchSpec, ConfigError};
use unionfs_efs::config_manager::ConfigManager;
use unionfs_efs::CreateRequest;

struct Args {
    options: Vec<(String, String)>,
    size: Option<u64>,
    path: PathBuf,
    branches: Vec<BranchSpec>,
}

fn flag_value(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::InvalidValue(format!("{} requires a value", args[i])))
}

fn parse_args(args: &[String]) -> Result<Args, ConfigError> {
    let mut options = Vec::new();
    let mut size = None;
    let mut i = 1;

    // Parse options
    while i < args.len() {
        match args[i].as_str() {
            "-o" => {
                let value = flag_value(args, i)?;
                for option in value.split(',') {
                    let (key, value) = option.split_once('=').ok_or_else(|| {
                        ConfigError::InvalidValue(format!("Expected key=value, got '{}'", option))
                    })?;
                    options.push((key.to_string(), value.to_string()));
                }
                i += 2;
            }
            "--size" => {
                size = Some(parse_size(flag_value(args, i)?)?);
                i += 2;
            }
            _ => break,
        }
    }

    // Remaining arguments should be the path and branches
    if i + 1 >= args.len() {
        return Err(ConfigError::InvalidValue(
            "Missing path and branch directories".to_string(),
        ));
    }

    let path = PathBuf::from(&args[i]);
    let branches = args[i + 1..]
        .iter()
        .map(|arg| BranchSpec::parse(arg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Args {
        options,
        size,
        path,
        branches,
    })
}

fn print_usage(program: &str) {
    println!("unionfs-efs - create placement for union filesystems");
    println!();
    println!("Usage: {} [options] <path> <branch1> [branch2] ...", program);
    println!();
    println!("Options:");
    println!("  -o func.create=POLICY    Create policy (efs|lfs) [default: efs]");
    println!("  -o minfreespace=SIZE     Default branch reserve [default: 4G]");
    println!("  --size SIZE              Size of the file being created");
    println!();
    println!("Branches: PATH[=RW|RO|NC[,MINFREESPACE]]");
    println!();
    println!("Example:");
    println!("  {} --size 2G /videos/a.mkv /mnt/disk1 /mnt/disk2=RW,10G /mnt/disk3=NC", program);
}

fn main() -> ExitCode {
    // Initialize tracing with environment filter
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("unionfs-efs");

    if args.len() < 3 {
        print_usage(program);
        return ExitCode::from(2);
    }

    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let config = config::create_config();
    let manager = ConfigManager::new(config.clone());
    for (key, value) in &parsed.options {
        if let Err(e) = manager.set_option(key, value) {
            eprintln!("Error: option {}: {}", key, e);
            return ExitCode::from(2);
        }
    }
    config.write().branches = parsed.branches;

    let (policy, upstreams) = {
        let config = config.read();
        let policy = match config.create_policy() {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        };
        (policy, config.build_upstreams())
    };

    tracing::info!(
        path = %parsed.path.display(),
        upstreams = ?upstreams.iter().map(|u| u.name()).collect::<Vec<_>>(),
        policy = %policy.name(),
        size = ?parsed.size,
        "Resolving create target"
    );

    let mut request = CreateRequest::new(parsed.path);
    request.size = parsed.size;

    match policy.create(&upstreams, &request) {
        Ok(selected) => {
            for upstream in selected {
                println!("{}", upstream.name());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, errno = e.errno(), "Create policy failed");
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
