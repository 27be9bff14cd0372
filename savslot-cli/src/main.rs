use clap::{Args, Parser, Subcommand};
use anyhow::{Result, Context};
use std::fs;
use std::path::PathBuf;
use savslot_core::{CipherConfig, CipherMode, load_from_slot, save_to_slot, slot_path};

#[derive(Parser)]
#[command(name = "savslot")]
#[command(about = "Encrypted save-slot (de|en)crypt – CLI tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a JSON record into a save slot
    Save {
        /// Path to the plaintext JSON record
        input: PathBuf,

        /// Slot index (file becomes <dir>/save_slot<N>.sav)
        #[arg(short, long, default_value_t = 1)]
        slot: u32,

        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Decrypt a save slot back to JSON
    Load {
        /// Slot index
        #[arg(short, long, default_value_t = 1)]
        slot: u32,

        /// Where to write the decrypted JSON (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        cipher: CipherArgs,
    },
}

#[derive(Args)]
struct CipherArgs {
    /// Cipher mode: xor, ecb or cbc
    #[arg(short, long, default_value = "ecb")]
    mode: CipherMode,

    /// Directory holding the slot files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// AES key, exactly 16 bytes (required for ecb and cbc)
    #[arg(short, long, default_value = "")]
    key: String,

    /// CBC initialization vector, exactly 16 bytes
    #[arg(long, default_value = "")]
    iv: String,

    /// XOR integer key (only the low byte participates)
    #[arg(long, default_value_t = 12345)]
    xor_key: u32,
}

impl CipherArgs {
    fn config(&self) -> CipherConfig {
        CipherConfig::new(self.xor_key, self.key.as_bytes(), self.iv.as_bytes())
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Save { input, slot, cipher } => {
            cmd_save(&input, slot, &cipher)?;
        }
        Commands::Load { slot, out, cipher } => {
            cmd_load(slot, out.as_ref(), &cipher)?;
        }
    }

    Ok(())
}

fn cmd_save(input: &PathBuf, slot: u32, cipher: &CipherArgs) -> Result<()> {
    // Read plaintext record
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read record file: {}", input.display()))?;

    let record = savslot_core::deserialize(&bytes)
        .with_context(|| format!("{} is not a JSON object", input.display()))?;

    println!("[info] record keys={}  mode={}", record.len(), cipher.mode);

    // Encrypt and write the slot file
    save_to_slot(&record, slot, cipher.mode, &cipher.config(), &cipher.dir)?;

    println!(
        "[ok] wrote slot {} -> {}",
        slot,
        slot_path(&cipher.dir, slot).display()
    );

    Ok(())
}

fn cmd_load(slot: u32, out: Option<&PathBuf>, cipher: &CipherArgs) -> Result<()> {
    // Read and decrypt the slot file
    let record = load_from_slot(slot, cipher.mode, &cipher.config(), &cipher.dir)
        .with_context(|| format!("Failed to load slot {slot} from {}", cipher.dir.display()))?;

    println!("[info] record keys={}  mode={}", record.len(), cipher.mode);

    let json = serde_json::to_string_pretty(&record)?;

    match out {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write record file: {}", path.display()))?;
            println!("[ok] wrote record -> {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
