use mosaic_kernel::domain::module::IconRef;
use mosaic_kernel::schema::validate;
use proptest::prelude::*;
use serde_json::{Value, json};
use strum::VariantNames;

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,15}"
}

fn path() -> impl Strategy<Value = String> {
    (prop::bool::ANY, prop::collection::vec("[a-z0-9][a-z0-9._~-]{0,8}", 1..4)).prop_map(
        |(leading_slash, segments)| {
            let joined = segments.join("/");
            if leading_slash { format!("/{joined}") } else { joined }
        },
    )
}

fn icon() -> impl Strategy<Value = String> {
    prop::sample::select(IconRef::VARIANTS).prop_map(str::to_owned)
}

fn sub_item() -> impl Strategy<Value = Value> {
    ("[A-Za-z][A-Za-z ]{0,12}", path()).prop_map(|(title, url)| json!({ "title": title, "url": url }))
}

fn entry() -> impl Strategy<Value = Value> {
    ("[A-Za-z][A-Za-z ]{0,12}", path(), icon(), prop::collection::vec(sub_item(), 0..3)).prop_map(
        |(title, url, icon, subs)| json!({ "title": title, "url": url, "iconRef": icon, "subItems": subs }),
    )
}

fn declaration() -> impl Strategy<Value = Value> {
    (
        name(),
        prop::collection::vec(entry(), 0..4),
        prop::collection::btree_set(name(), 0..4),
    )
        .prop_map(|(module_name, routes, deps)| {
            json!({ "moduleName": module_name, "dashboardRoutes": routes, "dependencies": deps })
        })
}

proptest! {
    #[test]
    fn validating_validated_output_is_identity(raw in declaration()) {
        let once = validate(&raw).expect("generated declarations are valid");
        let again = validate(&serde_json::to_value(&once).unwrap()).expect("validated output revalidates");
        prop_assert_eq!(once, again);
    }

    #[test]
    fn non_objects_are_rejected(raw in prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".*".prop_map(Value::from),
    ]) {
        prop_assert!(validate(&raw).is_err());
    }
}
