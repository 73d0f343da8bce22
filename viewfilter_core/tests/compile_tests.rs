mod helpers;

use chrono::Weekday;
use helpers::{compiler, init_logging, matching, people_records};
use serde_json::json;
use viewfilter_core::{
    AdvancedFilter, CompileOptions, Condition, FieldCatalog, FilterGroup, LogicalOperator,
    Operator, StoredFilters, defaults, expand,
};

#[test]
fn test_status_and_age_range() {
    init_logging();
    let filter = AdvancedFilter::from_json(
        r#"{
            "globalLogicalOperator": "and",
            "groups": [{
                "id": "g1",
                "logicalOperator": "and",
                "conditions": [
                    {"id": "c1", "field": "status", "operator": "equals", "value": "active"},
                    {
                        "id": "c2", "field": "age", "operator": "between",
                        "valueFrom": 30, "valueTo": 40
                    }
                ]
            }]
        }"#,
    )
    .unwrap();

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(
        compiled.to_document(),
        json!({"$and": [
            {"status": {"$eq": "active"}},
            {"age": {"$gte": 30, "$lte": 40}}
        ]})
    );
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada", "Dee"]);
}

#[test]
fn test_email_contains_either() {
    init_logging();
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::Or)
            .with_condition(Condition::single("email", Operator::Contains, "acme"))
            .with_condition(Condition::single("email", Operator::Contains, "example")),
    );

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(
        compiled.to_document(),
        json!({"$or": [
            {"email": {"$regex": "acme", "$options": "i"}},
            {"email": {"$regex": "example", "$options": "i"}}
        ]})
    );
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada", "Bob"]);
}

#[test]
fn test_groups_joined_by_global_operator() {
    let filter = AdvancedFilter::new(LogicalOperator::Or)
        .with_group(
            FilterGroup::new(LogicalOperator::And)
                .with_condition(Condition::single("status", Operator::Equals, "lead")),
        )
        .with_group(
            FilterGroup::new(LogicalOperator::And)
                .with_condition(Condition::single("age", Operator::GreaterThan, 40)),
        );

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(matching(&compiled, &people_records()), vec!["Bob", "Cy"]);
}

#[test]
fn test_relative_dates_against_records() {
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::relative("createdAt", "last_7_days")),
    );

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada", "Dee"]);
}

#[test]
fn test_date_this_month_against_records() {
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::no_value("createdAt", Operator::DateThisMonth)),
    );

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada", "Dee"]);
}

#[test]
fn test_nested_group_mixes_and_with_or() {
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::single("status", Operator::Equals, "active"))
            .with_group(
                FilterGroup::new(LogicalOperator::Or)
                    .with_condition(Condition::no_value("email", Operator::IsEmpty))
                    .with_condition(Condition::single("age", Operator::GreaterThan, 40)),
            ),
    );

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(matching(&compiled, &people_records()), vec!["Bob", "Dee"]);
}

#[test]
fn test_broken_condition_does_not_void_query() {
    init_logging();
    let filter = AdvancedFilter::from_json(
        r#"{
            "globalLogicalOperator": "and",
            "groups": [{
                "logicalOperator": "and",
                "conditions": [
                    {"field": "status", "operator": "equals", "value": "active"},
                    {"field": "age", "operator": "greater_than", "value": "old"},
                    {"field": "name", "operator": "sounds_like", "value": "ada"},
                    {
                        "field": "createdAt", "operator": "date_is_relative",
                        "dateRelative": "fortnight"
                    },
                    {"field": "", "operator": "equals", "value": "x"}
                ]
            }]
        }"#,
    )
    .unwrap();

    let compiled = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(compiled.to_document(), json!({"status": {"$eq": "active"}}));
}

#[test]
fn test_query_combines_filter_and_search() {
    let stored = StoredFilters::from_json(
        r#"[{"id": "c1", "field": "status", "operator": "equals", "value": "active"}]"#,
    )
    .unwrap();
    let fields = defaults::people().searchable_fields();

    let compiled = compiler().compile_query(&stored, "ACME", &fields);
    let document = compiled.to_document();
    assert_eq!(document["$and"][0], json!({"status": {"$eq": "active"}}));
    assert_eq!(document["$and"][1]["$or"].as_array().unwrap().len(), fields.len());
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada"]);
}

#[test]
fn test_query_without_filter_is_search_only() {
    let stored = StoredFilters::from_json(r#"{"groups": [], "globalLogicalOperator": "and"}"#)
        .unwrap();
    let compiled = compiler().compile_query(&stored, "young", &["name".to_string()]);
    assert_eq!(
        compiled.to_document(),
        json!({"$or": [{"name": {"$regex": "young", "$options": "i"}}]})
    );
    assert_eq!(matching(&compiled, &people_records()), vec!["Cy"]);
}

#[test]
fn test_query_with_nothing_matches_everything() {
    let stored = StoredFilters::from_json("[]").unwrap();
    let compiled = compiler().compile_query(&stored, "  ", &["name".to_string()]);
    assert_eq!(compiled.to_document(), json!({}));
    assert_eq!(matching(&compiled, &people_records()).len(), people_records().len());
}

#[test]
fn test_field_prefix_applies_to_filter_and_search() {
    let compiler =
        compiler().with_options(CompileOptions::default().with_field_prefix("data"));
    let stored = StoredFilters::Simple(vec![Condition::single(
        "status",
        Operator::Equals,
        "active",
    )]);

    let compiled = compiler.compile_query(&stored, "ada", &["name".to_string()]);
    assert_eq!(
        compiled.to_document(),
        json!({"$and": [
            {"data.status": {"$eq": "active"}},
            {"$or": [{"data.name": {"$regex": "ada", "$options": "i"}}]}
        ]})
    );

    let record = json!({"data": {"status": "active", "name": "Ada"}});
    assert!(compiled.matches(&record));
}

#[test]
fn test_catalog_coerces_equality_operands() {
    let compiler = compiler().with_catalog(defaults::people());
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::single("age", Operator::Equals, "35"))
            .with_condition(Condition::single("isFavorite", Operator::NotEquals, "true")),
    );

    let compiled = compiler.advanced_filter_to_predicate(&filter);
    assert_eq!(
        compiled.to_document(),
        json!({"$and": [
            {"age": {"$eq": 35}},
            {"isFavorite": {"$ne": true}}
        ]})
    );
    assert_eq!(matching(&compiled, &people_records()), vec!["Cy"]);
}

#[test]
fn test_typed_values_that_do_not_coerce_are_identity() {
    init_logging();
    let people = defaults::people();
    let favorite = people.get("isFavorite").unwrap().clone();
    let filter = expand(vec![
        Condition::single("status", Operator::Equals, "active"),
        Condition::single("age", Operator::Equals, "abc"),
        Condition::blank().with_field(&favorite),
    ]);

    let compiled = compiler()
        .with_catalog(people)
        .advanced_filter_to_predicate(&filter);
    assert_eq!(compiled.to_document(), json!({"status": {"$eq": "active"}}));
    assert!(compiled.matches(&json!({"status": "active", "age": 30, "isFavorite": true})));
    assert_eq!(matching(&compiled, &people_records()), vec!["Ada", "Bob", "Dee"]);
}

#[test]
fn test_week_start_moves_this_week() {
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::no_value("createdAt", Operator::DateThisWeek)),
    );

    let sunday = compiler().advanced_filter_to_predicate(&filter);
    assert_eq!(
        sunday.to_document(),
        json!({"createdAt": {
            "$gte": {"$date": "2024-06-09T00:00:00.000Z"},
            "$lte": {"$date": "2024-06-15T23:59:59.999Z"}
        }})
    );

    let monday = compiler()
        .with_options(CompileOptions::default().with_week_start(Weekday::Mon))
        .advanced_filter_to_predicate(&filter);
    assert_eq!(
        monday.to_document(),
        json!({"createdAt": {
            "$gte": {"$date": "2024-06-10T00:00:00.000Z"},
            "$lte": {"$date": "2024-06-16T23:59:59.999Z"}
        }})
    );
    assert_eq!(matching(&monday, &people_records()), vec!["Ada", "Dee"]);
}

#[test]
fn test_membership_against_records() {
    let filter = AdvancedFilter::new(LogicalOperator::And).with_group(
        FilterGroup::new(LogicalOperator::And)
            .with_condition(Condition::single("status", Operator::NotIn, vec!["lead", "lost"])),
    );

    let compiled = compiler()
        .with_catalog(FieldCatalog::default())
        .advanced_filter_to_predicate(&filter);
    assert_eq!(
        matching(&compiled, &people_records()),
        vec!["Ada", "Bob", "Dee", "Eve"]
    );
}

#[test]
fn test_predicate_serializes_as_document() {
    let compiled = compiler().condition_to_predicate(
        &Condition::single("status", Operator::Equals, "active"),
        "",
    );
    assert_eq!(
        serde_json::to_string(&compiled).unwrap(),
        r#"{"status":{"$eq":"active"}}"#
    );
}
