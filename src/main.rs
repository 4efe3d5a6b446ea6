/// KQ Activator - Desktop Software Activation Client
///
/// Per run, this binary:
/// 1. Derives a machine fingerprint from hardware signals
/// 2. Asks the licensing service whether this machine needs an authorization code
/// 3. Opens the activation page when a code is required
/// 4. With a code given as argument, validates it against the service
use std::process::exit;

use kq_activator::client::{LicenseClient, activation_url};
use kq_activator::config::load_config;
use kq_activator::{fingerprint, launcher};

fn main() {
    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            exit(1);
        }
    };

    eprintln!("🔍 Collecting hardware signals...");
    let device_id = fingerprint::build_fingerprint();
    println!("Machine code: {}", device_id);

    let client = match LicenseClient::new(&config.effective_base_url()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ {}", e);
            exit(1);
        }
    };

    // A positional argument is an authorization code to validate; without
    // one, run the need-auth-code check.
    match std::env::args().nth(1) {
        Some(auth_code) => {
            eprintln!("🔍 Validating authorization code...");

            match client.validate_auth_code(&device_id, &config.soft_number, &auth_code) {
                Ok(true) => {
                    eprintln!("✅ Authorization code is valid");
                    exit(0);
                }
                Ok(false) => {
                    eprintln!("❌ Authorization code is invalid");
                    exit(1);
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {}", e);
                    exit(1);
                }
            }
        }
        None => {
            eprintln!("🔍 Checking whether this machine needs an authorization code...");

            match client.check_need_auth_code(&device_id, &config.soft_number) {
                Ok(decision) if decision.needs_code => match decision.activation_url {
                    Some(base) => {
                        let url = activation_url(&base, &device_id, &config.soft_number);
                        launcher::open_activation_page(&url);
                        eprintln!("✅ Activation pending - rerun with the code from the activation page");
                        exit(0);
                    }
                    None => {
                        eprintln!("❌ Server requires a code but sent no activation URL");
                        exit(1);
                    }
                },
                Ok(_) => {
                    eprintln!("✅ No authorization code required");
                    exit(0);
                }
                Err(e) => {
                    eprintln!("❌ Authorization check failed: {}", e);
                    exit(1);
                }
            }
        }
    }
}
