// Command-line entry point
// Thin dispatcher over the library: keygen, encode, decode

use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};

use stego_rsa::rsa::generate_default_keypair;
use stego_rsa::stego::{decode_message, encode_message};
use stego_rsa::util::{
    load_image, load_private_key, load_public_key, save_image, save_private_key, save_public_key,
};

const USAGE: &str = "usage:
  stego_rsa keygen <private-key-out> <public-key-out> [prime-bits]
  stego_rsa encode <cover.ppm> <stego-out.ppm> <public-key> <message>
  stego_rsa decode <stego.ppm> <private-key>";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("keygen") => {
            let [priv_out, pub_out] = two_paths(&args)?;
            let bits: u64 = match args.get(3) {
                Some(raw) => raw.parse().context("prime-bits must be an integer")?,
                None => 512,
            };

            let keypair = generate_default_keypair(bits, bits)
                .context("key generation failed")?;
            save_private_key(Path::new(priv_out), &keypair.private_key)?;
            save_public_key(Path::new(pub_out), &keypair.public_key)?;
            eprintln!(
                "generated {}-bit key pair -> {} / {}",
                keypair.public_key.bit_length(),
                priv_out,
                pub_out
            );
        }
        Some("encode") => {
            let (cover_path, out_path, key_path, message) = match &args[1..] {
                [a, b, c, d] => (a, b, c, d),
                _ => bail!("{}", USAGE),
            };

            let cover = load_image(Path::new(cover_path))
                .with_context(|| format!("failed to load {}", cover_path))?;
            let public_key = load_public_key(Path::new(key_path))?;

            let stego = encode_message(&cover, message.as_bytes(), &public_key)?;
            save_image(Path::new(out_path), &stego)?;
            eprintln!("embedded {} bytes -> {}", message.len(), out_path);
        }
        Some("decode") => {
            let [stego_path, key_path] = two_paths(&args)?;

            let stego = load_image(Path::new(stego_path))
                .with_context(|| format!("failed to load {}", stego_path))?;
            let private_key = load_private_key(Path::new(key_path))?;

            let message = decode_message(&stego, &private_key)?;
            let text = String::from_utf8(message)
                .context("recovered message is not valid UTF-8")?;
            println!("{}", text);
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

fn two_paths(args: &[String]) -> Result<[&str; 2]> {
    match args {
        [_, a, b, ..] => Ok([a, b]),
        _ => bail!("{}", USAGE),
    }
}
