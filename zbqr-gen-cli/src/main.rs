use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod render_png;

/// zbqr code generator
#[derive(Parser)]
#[command(name = "zbqr-gen", version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write the code as a PNG
    Encode {
        /// Text to encode (first 7 characters are used)
        #[arg(long)]
        text: String,
        /// Output file (defaults to the encoded text plus .png)
        #[arg(short, long)]
        output: Option<String>,
        /// Output directory when --output is not given
        #[arg(long, default_value = ".")]
        dir: String,
        /// Encode the text as given instead of keeping only what follows "bit.ly/"
        #[arg(long)]
        keep_link: bool,
    },
    /// Print the grid for some text as rows of 1 and 0
    Show {
        /// Text to encode
        #[arg(long)]
        text: String,
        /// Encode the text as given instead of keeping only what follows "bit.ly/"
        #[arg(long)]
        keep_link: bool,
    },
    /// List the symbol alphabet with codes
    Alphabet,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Encode {
            text,
            output,
            dir,
            keep_link,
        } => cmd_encode(&text, output.as_deref(), &dir, keep_link),
        Command::Show { text, keep_link } => cmd_show(&text, keep_link),
        Command::Alphabet => cmd_alphabet(),
    }
}

const LINK_PREFIX: &str = "bit.ly/";

/// The part of `text` to encode: everything after a `bit.ly/` prefix when one
/// is present, so short links fit in seven symbols.
fn link_payload(text: &str) -> &str {
    match text.find(LINK_PREFIX) {
        Some(i) => &text[i + LINK_PREFIX.len()..],
        None => text,
    }
}

fn payload(text: &str, keep_link: bool) -> &str {
    if keep_link {
        text
    } else {
        link_payload(text)
    }
}

/// Default output name for an encoded payload.
fn default_file_name(payload: &str) -> String {
    let stem: String = payload.chars().take(zbqr::codec::MESSAGE_LEN).collect();
    if stem.trim().is_empty() {
        "zbqr.png".to_string()
    } else {
        format!("{stem}.png")
    }
}

fn cmd_encode(text: &str, output: Option<&str>, dir: &str, keep_link: bool) -> Result<()> {
    let payload = payload(text, keep_link);
    let img = zbqr::encode_raster(payload);

    let path = match output {
        Some(p) => std::path::PathBuf::from(p),
        None => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory '{}'", dir))?;
            std::path::Path::new(dir).join(default_file_name(payload))
        }
    };

    render_png::write_raster_png(&img, &path)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_show(text: &str, keep_link: bool) -> Result<()> {
    let payload = payload(text, keep_link);
    let grid = zbqr::encode(payload);
    let codes = zbqr::codec::message_codes(payload);
    let padded: String = codes
        .iter()
        .map(|&c| zbqr::alphabet::code_to_symbol(c))
        .collect();

    println!("Message:   {:?}", padded);
    println!("Checksum:  {}", zbqr::codec::stored_checksum(&grid));
    println!();
    print!("{grid}");
    Ok(())
}

fn cmd_alphabet() -> Result<()> {
    println!("{:>4}  {:>6}  Symbol", "Code", "Bits");
    println!("{}", "-".repeat(22));
    for code in 0..64u8 {
        let symbol = zbqr::alphabet::code_to_symbol(code);
        let shown = match symbol {
            ' ' => "(space)".to_string(),
            zbqr::alphabet::IGNORE => "% (ignore)".to_string(),
            c => c.to_string(),
        };
        println!("{:>4}  {:06b}  {}", code, code, shown);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_prefix_stripped() {
        assert_eq!(link_payload("https://bit.ly/3xYz9"), "3xYz9");
        assert_eq!(link_payload("bit.ly/abc"), "abc");
        assert_eq!(link_payload("HELLO"), "HELLO");
    }

    #[test]
    fn keep_link_skips_stripping() {
        assert_eq!(payload("bit.ly/abc", true), "bit.ly/abc");
        assert_eq!(payload("bit.ly/abc", false), "abc");
    }

    #[test]
    fn file_names() {
        assert_eq!(default_file_name("HELLO"), "HELLO.png");
        assert_eq!(default_file_name("ABCDEFGHIJ"), "ABCDEFG.png");
        assert_eq!(default_file_name(""), "zbqr.png");
    }
}
