use base64::{Engine, prelude::BASE64_URL_SAFE};
use clap::{Parser, Subcommand};
use pyx::{MintObserver, Pyx, PyxEnvelope};
use rand::{RngCore, rngs::ThreadRng};
use std::io::{stdin, stdout};

#[derive(Parser)]
#[command(author, version, about = "CLI for the Pyx verifiable delay function")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform the sequential work and emit a pyx as a JSON envelope
    Mint {
        /// Base64 (URL-safe) 32-byte minter identity; random if omitted
        #[arg(long)]
        minter_id: Option<String>,
        /// Base64 (URL-safe) 32-byte challenge; random if omitted
        #[arg(long)]
        challenge: Option<String>,
        /// Number of sequential squarings (T)
        #[arg(long)]
        iterations: u64,
    },

    /// Verify a pyx (reads a JSON envelope from stdin)
    Verify,
}

// -------------------------------
// Input field helpers
// -------------------------------

fn build_random_field() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    ThreadRng::default().fill_bytes(&mut bytes);
    bytes
}

fn build_field_from_b64(flag: &str, b64_str: &str) -> [u8; 32] {
    let decoded = BASE64_URL_SAFE
        .decode(b64_str)
        .unwrap_or_else(|_| panic!("Invalid b64 string for --{flag}"));
    decoded
        .try_into()
        .unwrap_or_else(|_| panic!("--{flag} must decode to exactly 32 bytes"))
}

/// Mirrors mint progress onto stderr, one line per percent step.
struct StderrProgress {
    last: Option<u8>,
}

impl MintObserver for StderrProgress {
    fn on_progress(&mut self, percent: u8) -> bool {
        if self.last != Some(percent) {
            eprintln!("percent={percent}");
            self.last = Some(percent);
        }
        true
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mint {
            minter_id,
            challenge,
            iterations,
        } => run_mint(minter_id, challenge, iterations),
        Commands::Verify => run_verify(),
    }
}

fn run_mint(minter_id_b64: Option<String>, challenge_b64: Option<String>, iterations: u64) {
    let minter_id = match minter_id_b64 {
        Some(b64_str) => build_field_from_b64("minter-id", &b64_str),
        None => build_random_field(),
    };
    let challenge = match challenge_b64 {
        Some(b64_str) => build_field_from_b64("challenge", &b64_str),
        None => build_random_field(),
    };

    eprintln!("MINT.CONFIG.START");
    eprintln!("minter_id={}", BASE64_URL_SAFE.encode(minter_id));
    eprintln!("challenge={}", BASE64_URL_SAFE.encode(challenge));
    eprintln!("iterations={}", iterations);
    eprintln!("MINT.CONFIG.END");

    eprintln!("MINT.WORK.START");
    let mut progress = StderrProgress { last: None };
    let pyx =
        Pyx::mint_observed(minter_id, challenge, iterations, &mut progress).unwrap_or_else(|err| {
            eprintln!("MINT.WORK.ERROR");
            eprintln!("error={}", err);
            std::process::exit(1);
        });
    eprintln!("MINT.WORK.END");

    eprintln!("MINT.OUTPUT");
    eprintln!("pyx_id={}", BASE64_URL_SAFE.encode(pyx.pyx_id()));
    serde_json::to_writer(stdout(), &PyxEnvelope::from_pyx(&pyx)).expect("Failed to serialize pyx");
}

fn run_verify() {
    eprintln!("VERIFY.INPUT.START");
    let envelope: PyxEnvelope = serde_json::from_reader(stdin()).unwrap_or_else(|err| {
        eprintln!("VERIFY.INPUT.ERROR");
        eprintln!("error={}", err);
        std::process::exit(1);
    });
    let pyx = envelope.into_pyx().unwrap_or_else(|err| {
        eprintln!("VERIFY.INPUT.ERROR");
        eprintln!("error={}", err);
        std::process::exit(1);
    });
    eprintln!("VERIFY.INPUT.END");

    eprintln!("VERIFY.EXEC.START");
    let result = pyx.verify();
    eprintln!("VERIFY.EXEC.END");

    match result {
        Ok(()) => {
            eprintln!("VALID");
            eprintln!("VERIFY.RESULT");
            eprintln!("valid=true");
        }
        Err(error) => {
            eprintln!("INVALID");
            eprintln!("VERIFY.RESULT");
            eprintln!("valid=false");
            eprintln!("reason={}", error);
            std::process::exit(1);
        }
    }
}
