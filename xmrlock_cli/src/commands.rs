use crate::config::{LockCommand, ParamsCommand, SecretCommand, SimulateCommand};
use crate::error::CliError;
use crate::settings::{OutputFormat, Settings};
use anyhow::anyhow;
use libxmrlock::amount::TokenAmount;
use libxmrlock::crypto::keys::SecretScalar;
use libxmrlock::helpers::{read_hex32, Timestamp};
use libxmrlock::lock::{AccountId, AssetId, AtomicLock, CallContext, InMemoryLedger, Ledger, LockParameters, LockTerms};
use libxmrlock::storage::{FileStore, LockStore};
use libxmrlock::swap::{recover_spend_key, SwapSecrets, TestVector};
use log::*;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

const SIM_DEPOSITOR: AccountId = AccountId::new([0xde; 32]);
const SIM_TAKER: AccountId = AccountId::new([0x7a; 32]);
const SIM_ASSET: AssetId = AssetId::new([0xa5; 32]);

pub fn exec_secret_command(cmd: SecretCommand, format: OutputFormat) -> Result<(), anyhow::Error> {
    match cmd {
        SecretCommand::New { spend_key, lock_params } => {
            let mut rng = rand::rng();
            let spend_key = match spend_key {
                Some(hex) => SecretScalar::from_hex(&hex)?,
                None => SecretScalar::random(&mut rng),
            };
            let secrets = SwapSecrets::generate(&spend_key, &mut rng)?;
            if let Some(path) = lock_params {
                write_json(&path, &secrets.params)?;
                info!("Lock parameters written to {}", path.display());
            }
            match format {
                OutputFormat::Json => print_json(&secrets)?,
                OutputFormat::Text => {
                    println!("Public spend key : {}", secrets.split.public_spend_key().as_hex());
                    println!("Base secret      : {}", secrets.split.base_secret().as_hex());
                    println!("Adaptor secret   : {}", secrets.split.adaptor_secret().as_hex());
                    println!("Adaptor point    : {}", secrets.split.adaptor_point().as_hex());
                    println!("Hashlock         : {}", secrets.params.hashlock);
                    println!("Hashlock words   : {:08x?}", secrets.params.hashlock.words());
                    println!("Proof            : {}", hex::encode(secrets.params.proof.to_bytes()));
                }
            }
        }
        SecretCommand::Recover { base, revealed } => {
            let base = SecretScalar::from_hex(&base)?;
            let revealed = read_hex32("revealed", &revealed)?;
            let spend_key = recover_spend_key(&base, &revealed)?;
            let public_key = spend_key.public_point();
            match format {
                OutputFormat::Json => {
                    print_json(&serde_json::json!({ "spend_key": spend_key, "public_spend_key": public_key }))?
                }
                OutputFormat::Text => {
                    println!("Spend key        : {}", spend_key.as_hex());
                    println!("Public spend key : {}", public_key.as_hex());
                }
            }
        }
    }
    Ok(())
}

pub fn exec_params_command(cmd: ParamsCommand, format: OutputFormat) -> Result<(), anyhow::Error> {
    match cmd {
        ParamsCommand::Verify { file } => {
            let params: LockParameters = read_json(&file)?;
            let adaptor_point = params.verify().map_err(|e| anyhow!("{} does not verify. {e}", file.display()))?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "valid": true, "adaptor_point": adaptor_point }))?,
                OutputFormat::Text => {
                    println!("Lock parameters are valid.");
                    println!("Adaptor point : {}", adaptor_point.as_hex());
                    println!("Hashlock      : {}", params.hashlock);
                }
            }
        }
    }
    Ok(())
}

pub fn exec_lock_command(cmd: LockCommand, settings: &Settings) -> Result<(), anyhow::Error> {
    match cmd {
        LockCommand::Simulate(sim) => simulate(sim, settings),
    }
}

fn simulate(cmd: SimulateCommand, settings: &Settings) -> Result<(), anyhow::Error> {
    let secrets: SwapSecrets = read_json(&cmd.file)?;
    let amount = TokenAmount::from_decimal(&cmd.amount, cmd.decimals)
        .ok_or_else(|| CliError::InvalidInput(format!("{} is not an amount with {} decimals", cmd.amount, cmd.decimals)))?;
    let asset = if amount.is_zero() { AssetId::NONE } else { SIM_ASSET };
    let now = Timestamp::now();
    let terms = LockTerms {
        depositor: SIM_DEPOSITOR,
        asset,
        amount,
        lock_until: now.after(Duration::from_secs(settings.lock_duration_secs)),
    };
    let mut ledger = InMemoryLedger::new();
    ledger.mint(&asset, &SIM_DEPOSITOR, amount)?;
    let mut store = FileStore::new(settings.store_path.clone())?;
    let depositor = CallContext::new(SIM_DEPOSITOR, now);
    let taker = CallContext::new(SIM_TAKER, now);

    let mut lock = AtomicLock::create(secrets.params.clone(), terms, &depositor)?;
    store.write_lock(&lock)?;
    println!("Created lock {} (expires {})", lock.name(), lock.get_expiry());

    lock.deposit(&depositor, &mut ledger)?;
    store.write_lock(&lock)?;
    println!("Deposited {amount} into {}", lock.custody_account());

    let secret = secrets.unlock_secret();
    if !lock.release(&taker, &mut ledger, secret.as_slice())? {
        return Err(anyhow!("The secret in {} does not match its hashlock", cmd.file.display()));
    }
    store.write_lock(&lock)?;
    println!("Released to {}. Taker balance: {}", SIM_TAKER, ledger.balance(&asset, &SIM_TAKER));
    println!("Lock state saved to {}", store.path().display());
    Ok(())
}

pub fn exec_vectors_command(format: OutputFormat) -> Result<(), anyhow::Error> {
    let vector = TestVector::canonical()?;
    vector.check()?;
    match format {
        OutputFormat::Json => print_json(&vector)?,
        OutputFormat::Text => {
            println!("secret        : {}", hex::encode(vector.secret));
            println!("hashlock      : {}", vector.hashlock);
            println!("hashlock words: {:08x?}", vector.hashlock_words);
            println!("G             : {}", hex::encode(vector.g.as_bytes()));
            println!("Y             : {}", hex::encode(vector.y.as_bytes()));
            println!("T             : {}", hex::encode(vector.adaptor_point.as_bytes()));
            println!("U             : {}", hex::encode(vector.proof.u().as_bytes()));
            println!("c             : {}", hex::encode(vector.proof.challenge().as_bytes()));
            println!("s             : {}", hex::encode(vector.proof.response().as_bytes()));
            println!("R1            : {}", hex::encode(vector.proof.r1().as_bytes()));
            println!("R2            : {}", hex::encode(vector.proof.r2().as_bytes()));
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
