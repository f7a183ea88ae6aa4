//! Font registration is process-wide, so these checks live in their own test
//! binary and run as a single test.

use std::io::Write as _;
use std::path::Path;

use scene::{RenderError, font_loaded, load_font, registered_font};

#[test]
fn first_registered_font_is_kept() {
    if !load_font(None).unwrap() {
        eprintln!("no system font available, nothing to check");
        return;
    }
    assert!(font_loaded());
    let active = registered_font().unwrap().to_path_buf();

    // Same font again
    assert!(load_font(Some(&active)).unwrap());
    assert_eq!(registered_font(), Some(active.as_path()));

    // A different file is not read as a font once one is registered
    let mut other = tempfile::NamedTempFile::new().unwrap();
    other.write_all(b"not a font").unwrap();
    assert!(load_font(Some(other.path())).unwrap());
    assert_eq!(registered_font(), Some(active.as_path()));

    // Missing files are still reported
    let err = load_font(Some(Path::new("/definitely/not/here.ttf"))).unwrap_err();
    assert!(matches!(err, RenderError::FontRead { .. }));
    assert_eq!(registered_font(), Some(active.as_path()));
}
