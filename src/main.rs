//! Seed Vault - password-protect a recovery phrase in an encrypted file.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use seed_vault::{envelope, FormatPolicy, SeedPhraseEncryptor};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "seed-vault")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Encrypt a recovery phrase under a password",
    long_about = "Encrypts a cryptocurrency recovery phrase into a JSON envelope using PBKDF2-HMAC-SHA256 key derivation and AES-CBC with an HMAC-SHA256 tag."
)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a recovery phrase into an envelope file
    Encrypt {
        /// Envelope file to write
        #[arg(long, short)]
        output: PathBuf,

        /// Encrypt even if the phrase fails format validation
        #[arg(long)]
        skip_validation: bool,

        /// Only accept ASCII letters in phrase words
        #[arg(long)]
        ascii_only: bool,

        /// Replace the output file if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Decrypt an envelope file and print the phrase
    Decrypt {
        /// Envelope file to read
        input: PathBuf,
    },

    /// Check that a phrase looks like a recovery phrase
    Validate {
        /// Phrase to check (prompted for if omitted)
        phrase: Option<String>,

        /// Only accept ASCII letters in phrase words
        #[arg(long)]
        ascii_only: bool,
    },

    /// Show envelope metadata without decrypting
    Inspect {
        /// Envelope file to read
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            output,
            skip_validation,
            ascii_only,
            overwrite,
        } => cmd_encrypt(&output, skip_validation, policy(ascii_only), overwrite),

        Commands::Decrypt { input } => cmd_decrypt(&input),

        Commands::Validate { phrase, ascii_only } => cmd_validate(phrase, policy(ascii_only)),

        Commands::Inspect { input } => cmd_inspect(&input),
    }
}

fn policy(ascii_only: bool) -> FormatPolicy {
    if ascii_only {
        FormatPolicy::ascii_only()
    } else {
        FormatPolicy::default()
    }
}

fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    let value = rpassword::prompt_password(prompt)
        .with_context(|| format!("failed to read input for '{}'", prompt.trim()))?;
    Ok(Zeroizing::new(value))
}

fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_encrypt(
    output: &Path,
    skip_validation: bool,
    policy: FormatPolicy,
    overwrite: bool,
) -> Result<()> {
    if output.exists() && !overwrite {
        bail!(
            "{} already exists (use --overwrite to replace it)",
            output.display()
        );
    }

    let encryptor = SeedPhraseEncryptor::with_policy(policy);

    let phrase = prompt_secret("Recovery phrase: ")?;
    if !skip_validation {
        let (ok, reason) = encryptor.validate_format(&phrase);
        if !ok {
            bail!("{} (use --skip-validation to encrypt anyway)", reason);
        }
    }

    let password = prompt_secret("Password: ")?;
    let confirm = prompt_secret("Confirm password: ")?;
    if *password != *confirm {
        bail!("passwords do not match");
    }

    let bytes = encryptor.encrypt(&phrase, &password)?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Recovery phrase encrypted to {}", output.display());
    println!("Keep your password safe: without it the phrase cannot be recovered.");

    Ok(())
}

fn cmd_decrypt(input: &Path) -> Result<()> {
    let bytes = read_envelope(input)?;
    // Parse before prompting so a malformed file fails fast.
    let envelope = envelope::decode(&bytes)?;

    let password = prompt_secret("Password: ")?;
    let phrase = SeedPhraseEncryptor::new().decrypt_secret(
        &envelope.token,
        &password,
        &envelope.metadata,
    )?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", phrase.as_str())?;
    stdout.flush()?;

    Ok(())
}

fn cmd_validate(phrase: Option<String>, policy: FormatPolicy) -> Result<()> {
    let phrase = match phrase {
        Some(p) => Zeroizing::new(p),
        None => prompt_secret("Recovery phrase: ")?,
    };

    let (ok, reason) = SeedPhraseEncryptor::with_policy(policy).validate_format(&phrase);
    println!("{}", reason);
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let envelope = envelope::decode(&read_envelope(input)?)?;
    let meta = &envelope.metadata;

    println!("Envelope: {}", input.display());
    println!("==========");
    println!("Version:      {}", meta.version);
    println!("Algorithm:    {}", meta.algorithm);
    println!("KDF:          {}", meta.kdf);
    println!("Iterations:   {}", meta.iterations);
    println!("Salt:         {}", meta.salt);
    match meta.created_at() {
        Ok(created) => println!("Created:      {}", created.to_rfc2822()),
        Err(_) => println!("Created:      {} (unparsed)", meta.timestamp),
    }
    println!("Token size:   {} bytes", envelope.token.len());

    Ok(())
}
