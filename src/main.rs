//! 命令行入口：从 stdin（或 `--input`）读取配置源码，转换为 XML 写入 `--out`。
//!
//! 退出码：0 成功；1 词法/语法/XML 错误；2 读写文件失败或参数错误。

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::{fs, io, process};

#[derive(Parser, Debug)]
#[command(version, about = "Convert the configuration language to XML")]
struct Args {
    /// Output XML file.
    #[arg(short, long)]
    out: PathBuf,

    /// Input file (reads stdin when omitted).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Name of the root element.
    #[arg(long, default_value = "config")]
    root: String,

    /// Omit the `<?xml ...?>` declaration.
    #[arg(long)]
    no_declaration: bool,

    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("conf2xml: {e:#}");
        let code = if e.downcast_ref::<conf2xml::Error>().is_some() {
            1
        } else {
            2
        };
        process::exit(code);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let src = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .context("failed to read stdin")?;
            s
        }
    };

    let opts = conf2xml::XmlOptions {
        root: args.root.clone(),
        indent: args.indent,
        declaration: !args.no_declaration,
        ..Default::default()
    };
    let xml = conf2xml::compile(&src, &opts)?;

    fs::write(&args.out, xml)
        .with_context(|| format!("failed to write output file {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}
