use std::path::{Path, PathBuf};

/// Images the graphical board is drawn with: background grid, prize icon and
/// player icon.
pub(crate) const ASSET_FILES: [&str; 3] = ["grid.png", "coin.png", "player.png"];

/// Looks for every asset under `dir` and returns the paths that are missing.
///
/// Missing assets only degrade presentation, so each one is logged as a
/// warning and the game carries on.
pub(crate) fn probe(dir: &Path) -> Vec<PathBuf> {
    ASSET_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| {
            let present = path.is_file();
            if !present {
                log::warn!("asset {} not found, continuing without it", path.display());
            }
            !present
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_asset_is_reported_for_missing_directory() {
        let dir = Path::new("/nonexistent/escape-room-assets");
        let missing = probe(dir);
        assert_eq!(
            missing,
            ASSET_FILES.iter().map(|name| dir.join(name)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn present_assets_are_not_reported() {
        let dir = std::env::temp_dir().join(format!("escape-room-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create asset dir");
        std::fs::write(dir.join("coin.png"), b"png").expect("write asset");

        let missing = probe(&dir);
        std::fs::remove_dir_all(&dir).expect("clean asset dir");

        assert_eq!(missing, vec![dir.join("grid.png"), dir.join("player.png")]);
    }
}
