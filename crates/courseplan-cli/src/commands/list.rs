use crate::config::Config;
use crate::render::write_listing;
use crate::support::{load_catalog_or_exit, print_json, resorted_records, write_stdout_or_exit};
use courseplan_catalog::CourseRecord;
use serde_json::json;

pub fn run(catalog: Option<String>, resort: bool, json_output: bool, config: &Config) {
    let path = config.catalog_path(catalog.as_deref());
    let (catalog, _) = load_catalog_or_exit(&path, config.memo_policy);

    let records: Vec<&CourseRecord> = if resort {
        resorted_records(catalog.store())
    } else {
        catalog.ordered_records().collect()
    };

    if json_output {
        let courses: Vec<_> = records
            .iter()
            .map(|record| json!({ "key": record.key, "title": record.title }))
            .collect();
        print_json(&json!({
            "action": "list",
            "catalogPath": path.display().to_string(),
            "ordering": if resort { "resort" } else { "index" },
            "courseCount": courses.len(),
            "courses": courses,
        }));
    } else {
        write_stdout_or_exit(|out| write_listing(out, records, resort));
    }
}
