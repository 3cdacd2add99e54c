//! File naming for downloaded cards.
//!
//! Downloads are named `<prefix>-<name>.png`, where the prefix comes from
//! `branding.file_prefix` (stock: `Skaka-Ramadan-Card`) and the name is the
//! trimmed recipient name:
//!
//! - `"Amina"` → `Skaka-Ramadan-Card-Amina.png`
//! - `"  Omar Ali "` → `Skaka-Ramadan-Card-Omar Ali.png`
//! - `"فاطمة"` → `Skaka-Ramadan-Card-فاطمة.png`
//!
//! Names are otherwise kept verbatim, including spaces and non-Latin
//! scripts. Characters that cannot appear in a file name on common
//! filesystems (path separators, `:*?"<>|`, control characters) become `_`
//! so a name can never escape the download directory.

/// Build the download file name for a card.
pub fn download_filename(prefix: &str, name: &str) -> String {
    format!("{}-{}.png", prefix, sanitize(name.trim()))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
