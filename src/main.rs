use std::{
    env,
    fs,
    path::Path,
    process::ExitCode,
};

use edulearn::{
    core::SummaryTier,
    gamification::{
        BadgeRequirement,
        POINTS_UPLOAD,
    },
    persistence::{
        self,
        FileStore,
    },
    DocumentPipeline,
    GenerationConfig,
    HeuristicStrategy,
    PlainTextSource,
    StructureAwareStrategy,
};

/// Demo driver: run the generation pipeline over a plain-text file standing
/// in for an extracted PDF, print the artifacts and update saved progress.
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: edulearn <text-file>");
        return ExitCode::FAILURE;
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let name = Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dokument")
        .to_string();

    // Form feeds mark page boundaries in text dumps; otherwise one page.
    let pages: Vec<String> = text.split('\x0c').map(|p| p.to_string()).collect();
    let source = PlainTextSource::new(pages);

    let strategy =
        StructureAwareStrategy::new(HeuristicStrategy::new(GenerationConfig::default()));
    let mut pipeline = DocumentPipeline::new(Box::new(strategy));

    let (document, bundle) = match pipeline.process(&source, &name).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("== {} ({} stron) ==\n", document.name, document.page_count);

    println!("-- Mapa myśli --");
    println!("{}", bundle.mind_map.central);
    for branch in &bundle.mind_map.branches {
        println!("  * {}", branch.topic);
        for subtopic in &branch.subtopics {
            println!("      - {subtopic}");
        }
    }

    println!("\n-- Streszczenie (średnie) --");
    println!("{}", bundle.summary.tier(SummaryTier::Medium));

    println!("\n-- Quiz ({} pytań) --", bundle.quiz.len());
    for (i, question) in bundle.quiz.iter().enumerate() {
        println!("{}. {}", i + 1, question.question);
        for (j, option) in question.options.iter().enumerate() {
            println!("   {}) {}", (b'a' + j as u8) as char, option);
        }
    }

    let mut store = FileStore::new();
    let mut progress = persistence::load_progress(&store);

    progress.documents_processed += 1;
    if let Some(level) = progress.add_points(POINTS_UPLOAD) {
        println!("\nNowy poziom: {}", level.display_name());
    }
    if let Some(badge) = progress.award_badge(BadgeRequirement::UploadPdf) {
        println!("\nNowa odznaka: {} {} - {}", badge.icon, badge.name, badge.description);
    }
    persistence::save_progress(&mut store, &progress);

    let mut recent = persistence::load_recent_documents(&store);
    recent.add(&document.name, document.page_count);
    persistence::save_recent_documents(&mut store, &recent);

    println!(
        "\nPunkty: {} | Poziom: {} | Dokumenty: {}",
        progress.points,
        progress.level().display_name(),
        progress.documents_processed
    );

    ExitCode::SUCCESS
}
