use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use go_removelines::{Category, CleanConfig, clean};
use tracing_subscriber::EnvFilter;

mod paths;

use paths::PathFilter;

#[derive(Parser, Debug)]
#[command(name = "go-removelines", version)]
#[command(about = "Remove leading and trailing blank lines in Go functions, structs, ifs, switches and blocks", long_about = None)]
struct Args {
    /// Files to clean. `<dir>/...` recurses into `dir`. Reads stdin when no path is given.
    paths: Vec<String>,

    /// Remove blank lines for this construct (repeatable, e.g. `-r func -r struct`)
    #[arg(
        long,
        short,
        value_name = "func|struct|if|switch|case|for|interface|block",
        default_values_t = Category::ALL
    )]
    remove: Vec<Category>,

    /// Write result to the source file instead of stdout
    #[arg(long, short)]
    write: bool,

    /// List files whose content would change instead of printing them
    #[arg(long, short)]
    list: bool,

    /// Skip directories with this name when expanding `...`
    #[arg(long, short, value_name = "DIR")]
    skip: Vec<String>,

    /// Skip `vendor` directories (also enabled by GO15VENDOREXPERIMENT=1)
    #[arg(long)]
    vendor: bool,

    /// Display debug messages, including a snapshot of the buffer before every pass
    #[arg(long, short)]
    debug: bool,
}

impl Args {
    fn config(&self) -> CleanConfig {
        CleanConfig {
            mode: self.remove.iter().copied().collect(),
            debug: self.debug,
        }
    }

    fn filter(&self) -> PathFilter {
        let vendor = self.vendor
            || std::env::var("GO15VENDOREXPERIMENT").is_ok_and(|value| value == "1");

        let mut names = self.skip.clone();
        if vendor {
            names.push("vendor".to_string());
        }
        PathFilter::new(names)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Unable to clean: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    tracing::debug!(mode = %config.mode, "cleaning with mode {}", config.mode.bits());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.paths.is_empty() {
        if args.write {
            bail!("could not write to source if reading from stdin");
        }

        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("unable to read stdin")?;

        let code = clean(&source, &config)?;
        if args.list {
            if code != source {
                writeln!(out, "<standard input>").context("unable to write to stdout")?;
            }
        } else {
            out.write_all(code.as_bytes())
                .context("unable to write to stdout")?;
        }
        return Ok(());
    }

    for path in paths::resolve(&args.paths, &args.filter()) {
        clean_path(&path, args, &config, &mut out)?;
    }
    out.flush().context("unable to write to stdout")?;

    Ok(())
}

/// Cleans one file, then writes it back, lists it or prints it depending on the flags.
fn clean_path(path: &Path, args: &Args, config: &CleanConfig, out: &mut impl Write) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("unable to read file `{}'", path.display()))?;
    let code = clean(&source, config).with_context(|| format!("`{}'", path.display()))?;
    let changed = code != source;

    if args.list && changed {
        writeln!(out, "{}", path.display()).context("unable to write to stdout")?;
    }

    if args.write {
        if changed {
            fs::write(path, &code)
                .with_context(|| format!("unable to write file `{}'", path.display()))?;
        }
    } else if !args.list {
        out.write_all(code.as_bytes())
            .with_context(|| format!("unable to write to stdout (`{}')", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use go_removelines::Mode;

    const DIRTY: &str = "package p\n\nfunc f() {\n\n\tg()\n}\n";
    const CLEAN: &str = "package p\n\nfunc f() {\n\tg()\n}\n";

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("go-removelines").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn remove_defaults_to_every_category() {
        assert_eq!(args(&[]).config().mode, Mode::ALL);
    }

    #[test]
    fn remove_flags_build_the_mode() {
        let config = args(&["-r", "func", "--remove", "STRUCT", "-r", "func"]).config();
        assert_eq!(config.mode, Mode::FUNC | Mode::STRUCT);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Args::try_parse_from(["go-removelines", "-r", "loop"]).is_err());
    }

    #[test]
    fn vendor_flag_adds_vendor_to_skip_list() {
        let filter = args(&["--vendor", "-s", "gen"]).filter();
        assert!(filter.skips(Path::new("x/vendor")));
        assert!(filter.skips(Path::new("x/gen")));
    }

    #[test]
    fn prints_cleaned_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        fs::write(&path, DIRTY).unwrap();

        let args = args(&[]);
        let mut out = Vec::new();
        clean_path(&path, &args, &args.config(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), CLEAN);
        assert_eq!(fs::read_to_string(&path).unwrap(), DIRTY);
    }

    #[test]
    fn writes_back_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        fs::write(&path, DIRTY).unwrap();

        let args = args(&["-w"]);
        let mut out = Vec::new();
        clean_path(&path, &args, &args.config(), &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), CLEAN);
    }

    #[test]
    fn lists_only_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        let dirty = dir.path().join("dirty.go");
        let tidy = dir.path().join("tidy.go");
        fs::write(&dirty, DIRTY).unwrap();
        fs::write(&tidy, CLEAN).unwrap();

        let args = args(&["-l"]);
        let mut out = Vec::new();
        clean_path(&dirty, &args, &args.config(), &mut out).unwrap();
        clean_path(&tidy, &args, &args.config(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", dirty.display())
        );
        assert_eq!(fs::read_to_string(&dirty).unwrap(), DIRTY);
    }

    #[test]
    fn syntax_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.go");
        fs::write(&path, "package p\n\nfunc f() {\n\treturn 1 +\n}\n").unwrap();

        let args = args(&["-w"]);
        let err = clean_path(&path, &args, &args.config(), &mut Vec::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.go"), "{message}");
        assert!(message.contains("syntax error"), "{message}");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package p\n\nfunc f() {\n\treturn 1 +\n}\n"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = args(&[]);
        let err = clean_path(
            Path::new("/definitely/not/here.go"),
            &args,
            &args.config(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unable to read file"));
    }
}
