use std::{fs, path::Path, path::PathBuf};

use clap::Parser;
use go_removelines::{Category, CleanConfig, Mode, clean};

#[derive(Parser, Debug)]
#[command(name = "fixtures")]
#[command(about = "Create or validate fixture files", long_about = None)]
struct Args {
    /// Write fixtures instead of validating them
    #[arg(long, short)]
    write: bool,

    /// Path to the fixtures directory (defaults to "./fixtures")
    #[arg(long, default_value = "fixtures")]
    dir: PathBuf,
}

/// `func_only.go` is cleaned with only [`Category::Func`] enabled; everything else uses all
/// categories.
fn mode_for(basename: &str) -> Mode {
    basename
        .strip_suffix("_only")
        .and_then(|name| name.parse::<Category>().ok())
        .map(Mode::from)
        .unwrap_or(Mode::ALL)
}

fn split_name(path: &Path) -> Result<(&str, &str), Box<dyn std::error::Error + Send + Sync>> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("invalid filename")?;
    let basename = filename
        .strip_suffix(".go")
        .ok_or("filename missing .go extension")?;
    Ok((filename, basename))
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let mut input_files = Vec::new();
    for entry in fs::read_dir(&args.dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if filename.ends_with(".go") && !filename.contains(".out.") {
            input_files.push(path);
        }
    }

    input_files.sort();

    if args.write {
        println!("Creating fixtures...");
        for input_path in &input_files {
            let (_, basename) = split_name(input_path)?;
            let config = CleanConfig::from(mode_for(basename));

            let source = fs::read_to_string(input_path)?;
            let code = clean(&source, &config)?;

            let out_path = args.dir.join(format!("{basename}.out.go"));
            fs::write(&out_path, &code)?;

            println!("  Created {} ({})", out_path.display(), config.mode);
        }
        println!("Done creating {} fixtures.", input_files.len());
    } else {
        println!("Validating fixtures...");
        let mut mismatches = Vec::new();

        for input_path in &input_files {
            let (filename, basename) = split_name(input_path)?;
            let config = CleanConfig::from(mode_for(basename));

            let source = fs::read_to_string(input_path)?;
            let code = clean(&source, &config)?;

            let out_path = args.dir.join(format!("{basename}.out.go"));
            if out_path.exists() {
                let expected = fs::read(&out_path)?;
                if code.as_bytes() != expected {
                    mismatches.push(format!("{filename}: code mismatch"));
                } else {
                    println!("  ✓ {filename}");
                }
            } else {
                mismatches.push(format!(
                    "{filename}: missing output file {}",
                    out_path.display()
                ));
            }
        }

        if !mismatches.is_empty() {
            eprintln!("\nValidation failed:");
            for mismatch in &mismatches {
                eprintln!("  ✗ {mismatch}");
            }
            return Err(format!("{} validation error(s)", mismatches.len()).into());
        }

        println!(
            "\nAll {} fixtures validated successfully!",
            input_files.len()
        );
    }

    Ok(())
}
