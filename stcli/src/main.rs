use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use walkdir::WalkDir;

use streamcrypt::consts::PACKETSIZE;
use streamcrypt::{HashAlgorithm, Keystream, StreamDecrypter, StreamEncrypter};

/// Packetized stream encryption and keystream hashing over files.
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a file into identifier-framed packets
    Encrypt {
        /// Path to the file holding the raw key bytes
        #[arg(short, long)]
        key: PathBuf,
        /// Path to the plaintext input file
        #[arg(short, long = "in")]
        input: PathBuf,
        /// Path to write the framed ciphertext to
        #[arg(short, long = "out")]
        output: PathBuf,
    },
    /// Decrypt a file produced by `encrypt`
    Decrypt {
        /// Path to the file holding the raw key bytes
        #[arg(short, long)]
        key: PathBuf,
        /// Path to the framed ciphertext input file
        #[arg(short, long = "in")]
        input: PathBuf,
        /// Path to write the recovered plaintext to
        #[arg(short, long = "out")]
        output: PathBuf,
    },
    /// Print the hex digest of files
    Hash {
        /// Digest algorithm
        #[arg(short, long, value_enum, default_value_t = Algorithm::Rc4)]
        algorithm: Algorithm,
        /// Digest width in bits (64, 128, 256 or 512)
        #[arg(short, long, default_value_t = 256)]
        bits: u16,
        /// Recursively hash files under directories
        #[arg(short, long)]
        recursive: bool,
        /// Files to hash (directories with --recursive)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Xor,
    Rc4,
}

impl From<Algorithm> for HashAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Xor => HashAlgorithm::Xor,
            Algorithm::Rc4 => HashAlgorithm::Rc4,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Encrypt { key, input, output } => encrypt(&key, &input, &output),
        Command::Decrypt { key, input, output } => decrypt(&key, &input, &output),
        Command::Hash {
            algorithm,
            bits,
            recursive,
            paths,
        } => hash(algorithm.into(), bits, recursive, &paths),
    }
}

fn read_key(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read key file {}", path.display()))
}

fn encrypt(key: &Path, input: &Path, output: &Path) -> Result<()> {
    let key = read_key(key)?;
    let mut encrypter = StreamEncrypter::new(Keystream::rc4(&key)?);

    let mut reader = open_input(input)?;
    let mut writer = create_output(output)?;

    // Each record on disk is identifier || payload length || ciphertext,
    // both integers big-endian.
    let mut chunk = [0u8; PACKETSIZE];
    loop {
        let len = reader.read(&mut chunk)?;
        if len == 0 {
            break;
        }
        let id = encrypter.send_data(&mut chunk[..len])?;
        writer.write_u16::<BigEndian>(id)?;
        writer.write_u16::<BigEndian>(len as u16)?;
        writer.write_all(&chunk[..len])?;
        debug!("sent packet {:#06x} carrying {} bytes", id, len);
    }

    writer.flush()?;
    Ok(())
}

fn decrypt(key: &Path, input: &Path, output: &Path) -> Result<()> {
    let key = read_key(key)?;
    let mut decrypter = StreamDecrypter::new(Keystream::rc4(&key)?)?;

    let mut reader = open_input(input)?;
    let mut writer = create_output(output)?;

    loop {
        let id = match reader.read_u16::<BigEndian>() {
            Ok(id) => id,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        let len = reader.read_u16::<BigEndian>()? as usize;
        if len > PACKETSIZE {
            bail!("corrupt record: {len}-byte payload exceeds the packet size");
        }

        let mut chunk = vec![0u8; len];
        reader.read_exact(&mut chunk)?;
        if !decrypter.receive_data(&mut chunk, id)? {
            bail!("packet {id:#06x} is outside the decryption window; wrong key or corrupt stream");
        }
        writer.write_all(&chunk)?;
        debug!("recovered packet {:#06x} carrying {} bytes", id, len);
    }

    writer.flush()?;
    Ok(())
}

fn hash(algorithm: HashAlgorithm, bits: u16, recursive: bool, paths: &[PathBuf]) -> Result<()> {
    if !matches!(bits, 64 | 128 | 256 | 512) {
        bail!("digest width must be 64, 128, 256 or 512 bits");
    }
    let width = bits / 8;

    for path in paths {
        if recursive && path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                hash_file(algorithm, width, entry.path())?;
            }
        } else {
            hash_file(algorithm, width, path)?;
        }
    }

    Ok(())
}

fn hash_file(algorithm: HashAlgorithm, width: u16, path: &Path) -> Result<()> {
    let data =
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let digest = algorithm.digest(&data, width);
    println!("{}  {}", digest, path.display());
    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("cannot open input file {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("cannot create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}
