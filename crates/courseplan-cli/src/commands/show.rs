use crate::config::Config;
use crate::render::{write_detail, write_not_found};
use crate::support::{load_catalog_or_exit, print_json, write_stdout_or_exit};
use courseplan_catalog::normalize_key;
use serde_json::json;

pub fn run(course: String, catalog: Option<String>, json_output: bool, config: &Config) {
    let path = config.catalog_path(catalog.as_deref());
    let (mut catalog, _) = load_catalog_or_exit(&path, config.memo_policy);
    let key = normalize_key(&course);
    let detail = catalog.course_detail(&key);

    if json_output {
        let payload = match &detail {
            None => json!({
                "action": "show",
                "catalogPath": path.display().to_string(),
                "course": key,
                "found": false,
            }),
            Some(detail) => {
                let (chain, error) = match &detail.closure {
                    Ok(chain) => (Some(chain.clone()), None),
                    Err(cycle) => (None, Some(cycle.to_string())),
                };
                json!({
                    "action": "show",
                    "catalogPath": path.display().to_string(),
                    "course": detail.record.key,
                    "found": true,
                    "title": detail.record.title,
                    "directPrerequisites": detail.direct(),
                    "fullChain": chain,
                    "error": error,
                })
            }
        };
        print_json(&payload);
        return;
    }

    write_stdout_or_exit(|out| match &detail {
        Some(detail) => write_detail(out, detail),
        None => write_not_found(out, &key),
    });
}
