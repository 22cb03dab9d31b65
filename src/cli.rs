use checklist_common::{Category, EntityKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checklist-scorer")]
#[command(about = "トレカ チェックリスト整形・スコア集計ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// チェックリストを解析してスコアをJSON出力
    Score {
        /// フォルダまたはファイル（省略時は既定フォルダ）
        inputs: Vec<PathBuf>,

        /// 出力JSONファイル（デフォルト: score.json）
        #[arg(short, long, default_value = "score.json")]
        output: PathBuf,

        /// ファイルを並列に解析
        #[arg(long)]
        parallel: bool,
    },

    /// 整形済みシート（Player/Team/Card Type/Numbering）を一括出力
    Clean {
        /// チェックリストのフォルダ（省略時は既定フォルダ）
        folder: Option<PathBuf>,

        /// 出力ディレクトリ
        #[arg(short, long, required = true)]
        output: PathBuf,
    },

    /// 選手・チーム別の集計を表示
    Report {
        /// チェックリストのフォルダ（省略時は既定フォルダ）
        folder: Option<PathBuf>,

        /// 集計単位 (player/team)
        #[arg(long, default_value = "player")]
        by: EntityKind,

        /// カテゴリで絞り込み (logoman/case-hit/auto-mem/base)
        #[arg(short, long)]
        category: Option<Category>,

        /// 上位N件のみ表示
        #[arg(short, long, default_value = "20")]
        top: usize,

        /// 複数選手カードをこの選手を含む組み合わせに限定
        #[arg(long)]
        including: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のチェックリストフォルダを設定
        #[arg(long)]
        set_folder: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_args() {
        let cli = Cli::try_parse_from([
            "checklist-scorer",
            "report",
            "checklists",
            "--by",
            "team",
            "--category",
            "auto-mem",
            "--top",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Report { folder, by, category, top, including } => {
                assert_eq!(folder, Some(PathBuf::from("checklists")));
                assert_eq!(by, EntityKind::Team);
                assert_eq!(category, Some(Category::AutoMem));
                assert_eq!(top, 5);
                assert!(including.is_none());
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_parse_score_defaults() {
        let cli = Cli::try_parse_from(["checklist-scorer", "score", "a.xlsx", "b.xlsx", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Score { inputs, output, parallel } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(output, PathBuf::from("score.json"));
                assert!(!parallel);
            }
            _ => panic!("expected score"),
        }
    }

    #[test]
    fn test_clean_requires_output() {
        assert!(Cli::try_parse_from(["checklist-scorer", "clean", "checklists"]).is_err());
    }
}
