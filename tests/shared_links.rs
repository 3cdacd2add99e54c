//! End-to-end flows through the public library API: generate a card, follow
//! its link in a fresh app, download it for real.

use ramadan_card::app::{App, Step};
use ramadan_card::config::CardConfig;
use ramadan_card::export::{DirectorySink, ResvgRasterizer};
use ramadan_card::page;
use ramadan_card::random::SystemRandom;
use ramadan_card::share;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

const BASE: &str = "https://cards.example.com/";

fn app_at(url: &str, seed: u64) -> App {
    App::new(
        &CardConfig::default(),
        Url::parse(url).unwrap(),
        Box::new(SystemRandom::seeded(seed)),
    )
}

fn rasterizer() -> ResvgRasterizer {
    // No system fonts: text is skipped, geometry still renders.
    ResvgRasterizer::with_options(usvg::Options::default())
}

#[test]
fn generated_link_reopens_same_card() {
    let mut sender = app_at(BASE, 1);
    sender.mount();
    sender.set_name("  Amina Noor ");
    sender.select_template("emerald");
    sender.generate().unwrap();
    sender.advance(Duration::from_millis(500));
    assert_eq!(sender.step(), Step::Result);

    let link = sender.share_url().to_string();
    let mut receiver = app_at(&link, 2);
    receiver.mount();
    receiver.advance(Duration::from_millis(500));

    assert_eq!(receiver.step(), Step::Result);
    let card = receiver.card().unwrap();
    assert_eq!(card.name, "Amina Noor");
    assert_eq!(card.template.id, "emerald");
    assert_eq!(receiver.share_url().as_str(), link);
}

#[test]
fn links_built_directly_match_generated_ones() {
    let mut app = app_at(BASE, 3);
    app.set_name("Zainab");
    app.select_template("royal");
    app.generate().unwrap();
    app.run_until_idle();

    let built = share::link(&Url::parse(BASE).unwrap(), "Zainab", "royal");
    assert_eq!(app.share_url(), &built);
}

#[test]
fn reset_then_new_card_replaces_link() {
    let mut app = app_at("https://cards.example.com/?name=Omar&template=warm", 4);
    app.mount();
    app.run_until_idle();
    assert_eq!(app.template().id, "warm");

    app.reset();
    assert!(share::read(app.share_url()).is_none());

    app.set_name("Khadija");
    app.generate().unwrap();
    app.run_until_idle();
    let shared = share::read(app.share_url()).unwrap();
    assert_eq!(shared.name, "Khadija");
    assert_eq!(shared.template.as_deref(), Some("warm"));
}

#[test]
fn download_writes_png_to_directory() {
    let tmp = TempDir::new().unwrap();
    let mut app = app_at(BASE, 5);
    app.set_name("Yusuf");
    app.generate().unwrap();
    app.run_until_idle();

    let mut sink = DirectorySink::new(tmp.path().join("downloads"));
    let path = app.download(&rasterizer(), &mut sink).unwrap();

    assert_eq!(path, tmp.path().join("downloads/Skaka-Ramadan-Card-Yusuf.png"));
    let png = image::open(&path).unwrap();
    assert_eq!((png.width(), png.height()), (1200, 1500));
    assert!(!app.is_downloading());
    assert_eq!(
        app.toast().map(|t| t.message.as_str()),
        Some("Card downloaded successfully!")
    );
}

#[test]
fn page_snapshot_reflects_shared_card() {
    let mut app = app_at("https://cards.example.com/?name=Maryam", 6);
    app.mount();
    app.advance(Duration::from_millis(500));

    let html = page::render_page_html(&app);
    assert!(html.contains("step-result"));
    assert!(html.contains("Maryam"));
    assert_eq!(html.matches("class=\"lantern\"").count(), 15);
}
