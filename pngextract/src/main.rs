use std::{env, io::Read, process::ExitCode};

use common::util::{mime::page_content_type, state::S3BaseSettings};
use mime::Mime;
use pngextract::{error::Disposition, handler::{handle, Handler}, render::init_pdfium, state::ServiceCollection};
use tracing::{error, info};

/// sysexits.h EX_TEMPFAIL
const EXIT_RETRY: u8 = 75;

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt().json().with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let handler = get_handler();
    let content_type = get_content_type();
    let s3_settings = get_s3_settings();

    let pdfium = match init_pdfium() {
        Ok(pdfium) => pdfium,
        Err(err) => {
            error!("Could not init pdfium: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let services = match ServiceCollection::build(s3_settings, pdfium, content_type) {
        Ok(services) => services,
        Err(err) => {
            error!("Could not build services: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut raw_event = Vec::new();
    if let Err(err) = std::io::stdin().read_to_end(&mut raw_event) {
        error!("Could not read event: {}", err);
        return ExitCode::FAILURE;
    }

    info!("Handling event with {:?}", handler);
    match handle(&services.extract_service, handler, &raw_event).await {
        Ok(response) => {
            println!("{}", response);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(disposition = ?err.disposition(), "Extraction failed: {}", err.chain());
            println!("{}", handler.failure_response());
            match err.disposition() {
                Disposition::Retry => ExitCode::from(EXIT_RETRY),
                Disposition::NoRetry => ExitCode::FAILURE,
            }
        }
    }
}

fn get_handler() -> Handler {
    env::var("PNGEXTRACT_HANDLER").ok().and_then(|name| Handler::from_name(&name)).unwrap_or(Handler::Pages)
}

fn get_content_type() -> Mime {
    page_content_type(env::var("PAGE_CONTENT_TYPE").ok().as_deref())
}

fn get_path_style() -> bool {
    let path_style = env::var("S3_PATH_STYLE").map(|path_style| path_style.parse::<bool>());
    match path_style {
        Ok(Ok(path_style)) => path_style,
        _ => false,
    }
}

fn get_s3_settings() -> S3BaseSettings {
    S3BaseSettings {
        endpoint: env::var("S3_ENDPOINT").ok(),
        region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        access_key_id: env::var("S3_ACCESS_KEY_ID").ok(),
        secret_access_key: env::var("S3_SECRET_ACCESS_KEY").ok(),
        path_style: get_path_style(),
    }
}
