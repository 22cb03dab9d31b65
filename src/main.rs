use checklist_common::{
    cards_per_file, multi_player_combinations, summarize, tally_by, Category, EntityKind,
};
use checklist_scorer::{cli, config, error, export, pipeline, reader, scanner};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::ChecklistError;
use indicatif::{ProgressBar, ProgressStyle};
use pipeline::{BatchOptions, FileError};
use reader::SheetNames;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn progress_bar(len: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")?.progress_chars("=>-"),
    );
    Ok(pb)
}

fn sheet_names(config: &Config) -> SheetNames {
    SheetNames {
        raw: config.raw_sheet.clone(),
        clean: config.clean_sheet.clone(),
    }
}

fn print_file_errors(errors: &[FileError]) {
    if errors.is_empty() {
        return;
    }
    println!("⚠ {}件のファイルをスキップ:", errors.len());
    for e in errors {
        println!("  - {}: {}", e.file_name, e.message);
    }
}

/// NoValidRecords のときはファイルエラーを表示してから返す
fn report_batch_error(err: ChecklistError) -> anyhow::Error {
    if let ChecklistError::NoValidRecords(errors) = &err {
        print_file_errors(errors);
    }
    err.into()
}

fn load_records(
    paths: &[PathBuf],
    options: &BatchOptions,
) -> anyhow::Result<pipeline::BatchOutcome> {
    let pb = progress_bar(paths.len())?;
    let outcome = pipeline::load_batch(paths, options, |path| {
        pb.set_message(pipeline::file_name_of(path));
        pb.inc(1);
    });
    pb.finish_and_clear();
    outcome.map_err(report_batch_error)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Score { inputs, output, parallel } => {
            println!("🃏 checklist-scorer - スコア集計\n");

            // 1. ファイル収集
            println!("[1/3] チェックリストを検索中...");
            let inputs = if inputs.is_empty() {
                vec![config.resolve_folder(None)?]
            } else {
                inputs
            };
            let paths = scanner::collect_inputs(&inputs)?;
            println!("✔ {}件のファイルを検出\n", paths.len());

            // 2. 解析
            let options = BatchOptions {
                sheets: sheet_names(&config),
                parallel: parallel || config.parallel,
            };
            println!("[2/3] 解析中...{}", if options.parallel { " (並列)" } else { "" });
            let outcome = load_records(&paths, &options)?;
            println!("✔ {}件のカードを取得\n", outcome.records.len());
            print_file_errors(&outcome.errors);

            // 3. 保存
            println!("[3/3] 結果を保存中...");
            let report = export::ScoreReport::from_outcome(&outcome);
            export::write_report(&report, &output)?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 完了 (合計スコア: {:.1})", report.total_score);
        }

        Commands::Clean { folder, output } => {
            println!("🧹 checklist-scorer - 整形シート出力\n");

            let folder = config.resolve_folder(folder)?;

            println!("[1/2] チェックリストを検索中...");
            let paths = scanner::collect_inputs(&[folder])?;
            println!("✔ {}件のファイルを検出\n", paths.len());

            println!("[2/2] 整形中...");
            let pb = progress_bar(paths.len())?;
            let summary = export::clean_batch(&paths, &output, &sheet_names(&config), |path| {
                pb.set_message(pipeline::file_name_of(path));
                pb.inc(1);
            });
            pb.finish_and_clear();
            let summary = summary.map_err(report_batch_error)?;

            for file in &summary.files {
                println!("✔ {} ({}行)", file.output.display(), file.rows);
            }
            print_file_errors(&summary.errors);

            println!("\n✅ {}ファイル / {}行を出力", summary.files.len(), summary.total_rows());
        }

        Commands::Report { folder, by, category, top, including } => {
            println!("📊 checklist-scorer - レポート\n");

            let folder = config.resolve_folder(folder)?;
            let files = scanner::scan_folder(&folder)?;
            if files.is_empty() {
                return Err(ChecklistError::NoFilesFound(folder.display().to_string()).into());
            }

            for (year, group) in scanner::group_by_year(&files) {
                println!("{} ({}件)", year, group.len());
            }
            println!();

            let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
            let options = BatchOptions {
                sheets: sheet_names(&config),
                parallel: config.parallel,
            };
            let outcome = load_records(&paths, &options)?;
            print_file_errors(&outcome.errors);

            print_summary(&outcome.records);
            print_tallies(&outcome.records, by, category, top);
            print_combinations(&outcome.records, including.as_deref(), top);

            println!("\nファイル別:");
            for (file, cards) in cards_per_file(&outcome.records) {
                println!("  {:<40} {:>6}", file, cards);
            }
        }

        Commands::Config { set_folder, show } => {
            let mut config = config;

            if let Some(folder) = set_folder {
                config.set_default_folder(folder)?;
                println!("✔ 既定フォルダを設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  生データシート: {}", config.raw_sheet);
                println!("  整形済みシート: {}", config.clean_sheet);
                println!(
                    "  既定フォルダ: {}",
                    config
                        .default_folder
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  並列実行: {}", if config.parallel { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

fn print_summary(records: &[checklist_common::CanonicalCardRecord]) {
    let summary = summarize(records);
    println!("全体: {}枚 / {}ファイル / スコア {:.1}", summary.physical_cards, summary.files, summary.total_score);
    for category in Category::ALL {
        println!("  {:<10} {:>6}", category.label(), summary.by_category.get(category));
    }
    println!("  複数選手: {}枚 / 複数チーム: {}枚", summary.multi_player_cards, summary.multi_team_cards);
}

fn print_tallies(
    records: &[checklist_common::CanonicalCardRecord],
    by: EntityKind,
    category: Option<Category>,
    top: usize,
) {
    let heading = match by {
        EntityKind::Player => "選手別",
        EntityKind::Team => "チーム別",
    };
    match category {
        Some(c) => println!("\n{} ({}):", heading, c),
        None => println!("\n{}:", heading),
    }

    for (rank, tally) in tally_by(records, by, category).iter().take(top).enumerate() {
        println!(
            "  {:>3}. {:<32} {:>5}枚  スコア {:>8.1}  (Logoman {} / Case Hit {} / Auto/Mem {})",
            rank + 1,
            tally.entity,
            tally.cards,
            tally.score,
            tally.by_category.top_tier,
            tally.by_category.case_hit,
            tally.by_category.auto_mem,
        );
    }
}

fn print_combinations(
    records: &[checklist_common::CanonicalCardRecord],
    including: Option<&str>,
    top: usize,
) {
    let combinations = multi_player_combinations(records, including);
    if combinations.is_empty() {
        return;
    }
    println!("\n複数選手カード:");
    for combo in combinations.iter().take(top) {
        println!("  {:<48} {:>5}", combo.players, combo.cards);
    }
}
