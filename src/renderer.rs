use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, ensure, Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::{
    conditional::FeatureFlags, contents::Contents, done, keys::Substitutions,
    manifest::AppConfig, palette::Palette, trace,
};

/// Files carrying this suffix are templates; the suffix is stripped from the
/// output path.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Top-level subtree holding the scheduled backend. Only walked when a
/// feature needing it is enabled.
const WORKER_SUBTREE: &str = "worker";

const IGNORED_FILES: [&str; 1] = [".DS_Store"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub copied: usize,
}

/// Walks a template tree and materializes the transformed output tree.
///
/// The transform itself is pure; all filesystem effects live here. An abort
/// mid-run leaves the files written so far in place.
pub struct Renderer<'a> {
    pub config: &'a AppConfig,
    pub dry_run: bool,
    pub overwrite: bool,
}

impl Renderer<'_> {
    pub fn render(&self, templates_dir: &Path) -> Result<RenderSummary> {
        ensure!(
            templates_dir.is_dir(),
            "Template path {} is not a directory",
            templates_dir.display()
        );

        let palette = Palette::derive(self.config.theme_color);
        let keys = Substitutions::from_config(self.config, &palette);
        let flags = FeatureFlags::from_config(self.config);

        let mut summary = RenderSummary::default();

        let walker = WalkDir::new(templates_dir)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| self.keeps(e));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(templates_dir)
                .expect("walkdir only yields children of its root");
            let target = self.config.output_path.join(output_rel(rel));

            self.render_file(entry.path(), &target, &flags, &keys, &mut summary)?;
        }

        Ok(summary)
    }

    /// Feature flags decide which top-level subtrees are walked at all.
    fn keeps(&self, entry: &DirEntry) -> bool {
        let Some(name) = entry.file_name().to_str() else {
            return true;
        };

        if entry.depth() == 1 && entry.file_type().is_dir() && name == WORKER_SUBTREE {
            return self.config.feature_notifications || self.config.feature_slack;
        }

        !IGNORED_FILES.contains(&name)
    }

    fn render_file(
        &self,
        source: &Path,
        target: &Path,
        flags: &FeatureFlags,
        keys: &Substitutions,
        summary: &mut RenderSummary,
    ) -> Result<()> {
        if !self.overwrite && target.exists() {
            bail!("File {} already exists", target.display());
        }

        if !self.dry_run {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let raw = fs::read(source)
            .with_context(|| format!("Failed to read template {}", source.display()))?;

        match String::from_utf8(raw) {
            Ok(text) => {
                let contents = Contents::new(text, source.to_path_buf());
                trace!("Transforming {}", contents.origin().display());

                let transformed = contents.transform(flags, keys);

                if !self.dry_run {
                    let mut file = OpenOptions::new()
                        .write(true)
                        .truncate(true)
                        .create(true)
                        .open(target)
                        .with_context(|| format!("Failed to open {}", target.display()))?;

                    file.write_all(transformed.as_bytes())?;
                }

                summary.rendered += 1;
            }
            // Not text: outside the templating scheme, pass through verbatim.
            Err(_) => {
                if !self.dry_run {
                    let options = fs_extra::file::CopyOptions::new().overwrite(self.overwrite);
                    fs_extra::file::copy(source, target, &options)
                        .with_context(|| format!("Failed to copy {}", source.display()))?;
                }

                summary.copied += 1;
            }
        }

        if self.dry_run {
            done!("Would create {}", target.display());
        } else {
            done!("Created {}", target.display());
        }

        Ok(())
    }
}

fn output_rel(rel: &Path) -> PathBuf {
    let stripped = rel
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX));

    match stripped {
        Some(name) => rel.with_file_name(name),
        None => rel.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_suffix_is_stripped() {
        assert_eq!(
            output_rel(Path::new("frontend/index.html.template")),
            PathBuf::from("frontend/index.html")
        );
        assert_eq!(
            output_rel(Path::new("frontend/logo.png")),
            PathBuf::from("frontend/logo.png")
        );
        // Only a trailing suffix counts.
        assert_eq!(
            output_rel(Path::new("a/x.template.bak")),
            PathBuf::from("a/x.template.bak")
        );
    }
}
