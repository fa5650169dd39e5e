//! Browser tests for the generated pages: lightbox, language toggle, menu,
//! and the gallery read on page load.
//!
//! Run with: `cargo test --test browser_site -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tiny_http::{Header, Response, Server, StatusCode};

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/generated")
}

/// Run `caojambo build --offline` into `output_dir`, pointing the page
/// script at `backend_url`.
fn build_site(output_dir: &Path, backend_url: &str) {
    if output_dir.exists() {
        std::fs::remove_dir_all(output_dir).expect("failed to clean output dir");
    }

    let status = Command::new(env!("CARGO_BIN_EXE_caojambo"))
        .args([
            "--state",
            output_dir.join("state.json").to_str().unwrap(),
            "--backend-url",
            backend_url,
            "build",
            "--offline",
            "--output",
            output_dir.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run caojambo");
    assert!(status.success(), "site generation failed");
}

fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    // Nothing listens on port 9, so the page keeps its built-in tiles.
    BUILT.get_or_init(|| build_site(&generated_dir(), "http://127.0.0.1:9"));
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load(page: &str) -> Arc<Tab> {
    ensure_site_built();
    open(&generated_dir().join(page))
}

fn open(file: &Path) -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    assert!(file.exists(), "missing: {}", file.display());

    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .expect("no value returned")
}

/// Evaluate `js` until it returns `expected` or five seconds pass.
fn wait_for(tab: &Tab, js: &str, expected: serde_json::Value) -> serde_json::Value {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let value = eval(tab, js);
        if value == expected || Instant::now() > deadline {
            return value;
        }
        thread::sleep(Duration::from_millis(50));
    }
}

/// Answer every `/api/gallery` request with `body` until the process exits.
fn serve_gallery(body: &'static str) -> String {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base_url = format!("http://{}", server.server_addr());
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let status = if request.url() == "/api/gallery" { 200 } else { 404 };
            let response = Response::from_string(body)
                .with_status_code(StatusCode(status))
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
                .with_header(Header::from_bytes("Access-Control-Allow-Origin", "*").unwrap());
            let _ = request.respond(response);
        }
    });
    base_url
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn lightbox_opens_wraps_and_closes() {
    let tab = load("index.html");

    tab.find_element(r#"[data-testid="gallery-image-6"]"#)
        .unwrap()
        .click()
        .unwrap();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').hidden"), false);
    assert_eq!(eval(&tab, "document.body.style.overflow"), "hidden");
    assert_eq!(eval(&tab, "document.getElementById('lightbox').dataset.index"), "5");

    tab.find_element(".lightbox-next").unwrap().click().unwrap();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').dataset.index"), "0");
    assert_eq!(
        eval(&tab, "document.querySelector('.lightbox-title').textContent"),
        "Cacao Fino de Aroma"
    );

    tab.find_element(".lightbox-prev").unwrap().click().unwrap();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').dataset.index"), "5");

    tab.find_element(".lightbox-close").unwrap().click().unwrap();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').hidden"), true);
    assert_eq!(eval(&tab, "document.body.style.overflow"), "auto");
}

#[test]
#[ignore]
fn language_toggle_persists_choice() {
    let tab = load("index.html");
    assert_eq!(eval(&tab, "localStorage.getItem('language')"), "es");

    tab.find_element(r#"[data-testid="language-toggle"]"#)
        .unwrap()
        .click()
        .unwrap();
    tab.wait_until_navigated().unwrap();
    assert_eq!(eval(&tab, "document.documentElement.lang"), "en");
    assert_eq!(eval(&tab, "localStorage.getItem('language')"), "en");

    // Opening the Spanish page again follows the stored choice.
    let again = load("index.html");
    again.wait_until_navigated().unwrap();
    assert_eq!(eval(&again, "document.documentElement.lang"), "en");

    eval(&again, "localStorage.clear(); true");
}

#[test]
#[ignore]
fn mobile_menu_toggles() {
    let tab = load("index.html");
    assert_eq!(eval(&tab, "document.getElementById('mobile-menu').hidden"), true);
    // The toggle is display:none at desktop width, so click it from script.
    eval(&tab, "document.querySelector('.menu-toggle').click(); true");
    assert_eq!(eval(&tab, "document.getElementById('mobile-menu').hidden"), false);
}

#[test]
#[ignore]
fn gallery_tiles_come_from_backend_on_load() {
    let base_url = serve_gallery(
        r#"[
          {"id": "a1", "title_es": "Secado al sol", "title_en": "Sun drying",
           "description_es": "Granos en el patio", "description_en": "Beans on the patio",
           "image_url": "https://cdn.example.com/a1.jpg", "category": "process"},
          {"id": "a2", "title_es": "Cosecha", "title_en": "Harvest",
           "image_url": "https://cdn.example.com/a2.jpg", "category": "cacao"}
        ]"#,
    );
    let output_dir = generated_dir().with_file_name("generated-remote");
    build_site(&output_dir, &base_url);

    let tab = open(&output_dir.join("index.html"));
    assert_eq!(
        wait_for(&tab, "document.querySelectorAll('.gallery-item').length", 2.into()),
        2
    );
    assert_eq!(
        eval(&tab, "document.querySelector('.gallery-item').className"),
        "gallery-item wide"
    );
    assert_eq!(
        eval(&tab, "document.querySelector('.gallery-item .gallery-title').textContent"),
        "Secado al sol"
    );
    assert_eq!(eval(&tab, "document.querySelectorAll('.gallery-description').length"), 1);

    // Rebuilt tiles drive the lightbox, wrapping at both ends.
    tab.find_element(r#"[data-testid="gallery-image-a2"]"#)
        .unwrap()
        .click()
        .unwrap();
    assert_eq!(eval(&tab, "document.getElementById('lightbox').dataset.index"), "1");
    tab.find_element(".lightbox-next").unwrap().click().unwrap();
    assert_eq!(
        eval(&tab, "document.querySelector('.lightbox-title').textContent"),
        "Secado al sol"
    );
}

#[test]
#[ignore]
fn gallery_keeps_builtin_tiles_when_backend_fails() {
    let tab = load("index.html");
    // Give the failed read time to settle before counting.
    thread::sleep(Duration::from_millis(500));
    assert_eq!(eval(&tab, "document.querySelectorAll('.gallery-item').length"), 6);
    assert_eq!(
        eval(&tab, "document.querySelector('.gallery-item .gallery-title').textContent"),
        "Cacao Fino de Aroma"
    );
}
