/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader};

use h1parse::ParserConfig;

use crate::{foreach_kv, humanize, key, value};

pub fn as_parser_config(v: &Yaml) -> anyhow::Result<ParserConfig> {
    let mut config = ParserConfig::default();
    match v {
        Yaml::Hash(map) => {
            foreach_kv(map, |k, v| match key::normalize(k).as_str() {
                "strict" => {
                    let strict = value::as_bool(v)?;
                    config.set_strict(strict);
                    Ok(())
                }
                "max_header_size" => {
                    let size = humanize::as_usize(v)?;
                    if size == 0 {
                        return Err(anyhow!("max header size should not be zero"));
                    }
                    config.set_max_header_size(size);
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
        }
        Yaml::Null => {}
        _ => {
            return Err(anyhow!(
                "yaml value type for 'parser config' should be 'map'"
            ));
        }
    }
    Ok(config)
}

/// Load the parser config from the first document of a yaml file.
///
/// An empty file gives the default config.
pub fn load_parser_config(path: &Path) -> anyhow::Result<ParserConfig> {
    let content = fs::read_to_string(path)
        .context(format!("failed to read config file {}", path.display()))?;
    let docs = YamlLoader::load_from_str(&content)
        .map_err(|e| anyhow!("invalid yaml file {}: {e}", path.display()))?;
    match docs.first() {
        Some(doc) => as_parser_config(doc)
            .context(format!("invalid parser config in file {}", path.display())),
        None => Ok(ParserConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h1parse::DEFAULT_MAX_HEADER_SIZE;

    #[test]
    fn parse_map() {
        let yaml = yaml_doc!("strict: true\nmax-header-size: 64KiB");
        let config = as_parser_config(&yaml).unwrap();
        assert!(config.strict());
        assert_eq!(config.max_header_size(), 64 * 1024);

        let yaml = yaml_doc!("Max_Header_Size: 4096");
        let config = as_parser_config(&yaml).unwrap();
        assert!(!config.strict());
        assert_eq!(config.max_header_size(), 4096);
    }

    #[test]
    fn defaults() {
        let yaml = yaml_doc!("~");
        let config = as_parser_config(&yaml).unwrap();
        assert!(!config.strict());
        assert_eq!(config.max_header_size(), DEFAULT_MAX_HEADER_SIZE);
    }

    #[test]
    fn invalid() {
        for s in [
            "strict: maybe",
            "max_header_size: 0",
            "max_header_size: -1",
            "unknown: 1",
            "- strict",
        ] {
            let yaml = yaml_doc!(s);
            assert!(as_parser_config(&yaml).is_err(), "{s}");
        }
    }

    #[test]
    fn load_file() {
        let path = std::env::temp_dir().join(format!("h1parse-yaml-{}.yaml", std::process::id()));
        fs::write(&path, "strict: yes\nmax_header_size: 16K\n").unwrap();
        let config = load_parser_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(config.strict());
        assert_eq!(config.max_header_size(), 16000);

        let e = load_parser_config(&path).unwrap_err();
        assert!(e.to_string().starts_with("failed to read config file"));
    }
}
