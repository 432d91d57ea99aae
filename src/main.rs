//! Command-line frontend for the iclouder library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};

use iclouder::{download, fetch_album, plan, ConfigError, Error, FilenamePolicy};

/// Batch downloader for public iCloud shared albums.
#[derive(Parser, Debug)]
#[command(name = "iclouder", version, about, long_about = None)]
struct Args {
    /// The token part of the shared iCloud album URL
    token: String,

    /// Download a single random photo instead of the whole album
    #[arg(long)]
    single: bool,

    /// Fixed filename for the downloaded photo, overwritten on every run
    /// (requires --single)
    #[arg(long)]
    filename: Option<String>,

    /// Destination directory for downloads
    #[arg(long, default_value = ".")]
    destination: PathBuf,

    /// Skip the first N album entries when picking a random photo
    #[arg(long, default_value_t = 0)]
    ignore: usize,

    /// Show logs up to debug level
    #[arg(long)]
    debug: bool,
}

fn check_args(args: &Args) -> Result<(), ConfigError> {
    if args.filename.is_some() && !args.single {
        return Err(ConfigError::FilenameWithoutSingle);
    }
    if args.token.is_empty() {
        return Err(ConfigError::EmptyToken);
    }
    Ok(())
}

/// Runs the fetch and returns the number of failed downloads.
async fn run(args: &Args) -> Result<usize, Error> {
    let client = reqwest::Client::new();

    let album = fetch_album(&client, &args.token).await?;
    info!(
        "album {:?} has {} photos",
        album.metadata.stream_name,
        album.photos.len()
    );

    let downloaded = plan::downloaded_set(&args.destination)?;

    if args.single {
        let photo = {
            let mut rng = rand::thread_rng();
            plan::plan_single_random(&album.photos, &downloaded, args.ignore, &mut rng)
        };
        let photo = match photo {
            Some(photo) => photo,
            None => {
                info!("nothing new to fetch");
                return Ok(0);
            }
        };
        let policy = match &args.filename {
            Some(name) => FilenamePolicy::Fixed(name.clone()),
            None => FilenamePolicy::Derived,
        };
        let path = download::download_photo(&client, photo, &args.destination, &policy).await?;
        info!("downloaded a single random photo as {}", path.display());
        return Ok(0);
    }

    let todo = plan::plan_all(&album.photos, &downloaded);
    info!(
        "downloading {} photos ({} already present)",
        todo.len(),
        downloaded.len()
    );

    let mut failures = 0;
    for photo in todo {
        match download::download_photo(&client, photo, &args.destination, &FilenamePolicy::Derived)
            .await
        {
            Ok(path) => info!("downloaded {}", path.display()),
            Err(e) => {
                error!("failed to download {}: {}", photo.photo_guid, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        error!("{} downloads failed", failures);
    }
    Ok(failures)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(if args.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    if let Err(e) = check_args(&args) {
        eprintln!("error: {}", e);
        eprintln!("run with --help for usage");
        return ExitCode::from(2);
    }

    match run(&args).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(Error::Config(e)) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
