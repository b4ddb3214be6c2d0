//! Plan schemas - validation, format detection and simplified/internal conversion
//!
//! Two JSON shapes exist for a workout collection:
//! - the internal schema (`Vec<WorkoutDay>`), used for persistence and display;
//! - the simplified schema, a flat Italian-field interchange format produced
//!   by the AI prompt workflow (`{title, subtitle, esercizi: [{nome, serie,
//!   tipo, note}]}`), with no zones, ids or presentation tokens.
//!
//! Import accepts either shape; export always emits the simplified one so a
//! backup can be fed straight back to the plan-generation prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Exercise, GymZone, MuscleGroup, WorkoutDay};

/// One movement in the simplified interchange schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedExercise {
    pub nome: String,
    pub serie: String,
    pub tipo: MuscleGroup,
    pub note: String,
}

/// One day in the simplified interchange schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedDay {
    pub title: String,
    pub subtitle: String,
    pub esercizi: Vec<SimplifiedExercise>,
}

/// Field-level failure while validating an internal-schema collection.
/// Indices are 1-based because they are shown to the user as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected a top-level array of workout days")]
    NotAnArray,
    #[error("day {day}: expected an object")]
    DayNotObject { day: usize },
    #[error("day {day}: missing or invalid field `{field}`")]
    DayField { day: usize, field: &'static str },
    #[error("day {day}, zone {zone}: expected an object")]
    ZoneNotObject { day: usize, zone: usize },
    #[error("day {day}, zone {zone}: missing or invalid field `{field}`")]
    ZoneField {
        day: usize,
        zone: usize,
        field: &'static str,
    },
    #[error("day {day}, zone {zone}, exercise {exercise}: expected an object")]
    ExerciseNotObject {
        day: usize,
        zone: usize,
        exercise: usize,
    },
    #[error("day {day}, zone {zone}, exercise {exercise}: missing or invalid field `{field}`")]
    ExerciseField {
        day: usize,
        zone: usize,
        exercise: usize,
        field: &'static str,
    },
    #[error("day {day}, zone {zone}, exercise {exercise}: unknown muscle group `{tag}`")]
    UnknownType {
        day: usize,
        zone: usize,
        exercise: usize,
        tag: String,
    },
}

/// Why an import was rejected. One variant per stage so the user always sees
/// which step failed; the previous collection is never touched on error.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is empty")]
    EmptyFile,
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("expected a top-level array of workout days")]
    NotAnArray,
    #[error("the collection contains no days")]
    EmptyCollection,
    #[error("could not convert simplified plan: {0}")]
    Conversion(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Which of the two accepted shapes a parsed collection is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Internal,
    Simplified,
}

/// A parsed array is simplified when its first day carries `esercizi` and no
/// `zones`; everything else is treated as internal and fully validated.
pub fn detect_format(days: &[Value]) -> PlanFormat {
    match days.first() {
        Some(first) if first.get("esercizi").is_some() && first.get("zones").is_none() => {
            PlanFormat::Simplified
        }
        _ => PlanFormat::Internal,
    }
}

fn require_str(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<String, &'static str> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(field)
}

/// Validate an internal-schema collection, depth-first day -> zone ->
/// exercise, stopping at the first violation. All-or-nothing: a single bad
/// field rejects the whole import.
pub fn validate(data: &Value) -> Result<Vec<WorkoutDay>, ValidationError> {
    let days = data.as_array().ok_or(ValidationError::NotAnArray)?;

    let mut out = Vec::with_capacity(days.len());
    for (di, day) in days.iter().enumerate() {
        let day_no = di + 1;
        let obj = day
            .as_object()
            .ok_or(ValidationError::DayNotObject { day: day_no })?;

        let id = obj
            .get("id")
            .and_then(Value::as_i64)
            .ok_or(ValidationError::DayField { day: day_no, field: "id" })?;
        let field = |f| ValidationError::DayField { day: day_no, field: f };
        let title = require_str(obj, "title").map_err(field)?;
        let subtitle = require_str(obj, "subtitle").map_err(field)?;
        let theme = require_str(obj, "theme").map_err(field)?;
        let accent = require_str(obj, "accent").map_err(field)?;
        let bg_light = require_str(obj, "bgLight").map_err(field)?;
        let bg_dark = require_str(obj, "bgDark").map_err(field)?;
        let zones = obj
            .get("zones")
            .and_then(Value::as_array)
            .ok_or(ValidationError::DayField { day: day_no, field: "zones" })?;

        let mut out_zones = Vec::with_capacity(zones.len());
        for (zi, zone) in zones.iter().enumerate() {
            let zone_no = zi + 1;
            let zobj = zone.as_object().ok_or(ValidationError::ZoneNotObject {
                day: day_no,
                zone: zone_no,
            })?;
            let name = require_str(zobj, "name").map_err(|field| ValidationError::ZoneField {
                day: day_no,
                zone: zone_no,
                field,
            })?;
            let exercises = zobj.get("exercises").and_then(Value::as_array).ok_or(
                ValidationError::ZoneField {
                    day: day_no,
                    zone: zone_no,
                    field: "exercises",
                },
            )?;

            let mut out_exercises = Vec::with_capacity(exercises.len());
            for (ei, exercise) in exercises.iter().enumerate() {
                let ex_no = ei + 1;
                let eobj = exercise
                    .as_object()
                    .ok_or(ValidationError::ExerciseNotObject {
                        day: day_no,
                        zone: zone_no,
                        exercise: ex_no,
                    })?;
                let efield = |field| ValidationError::ExerciseField {
                    day: day_no,
                    zone: zone_no,
                    exercise: ex_no,
                    field,
                };
                let ex_name = require_str(eobj, "name").map_err(efield)?;
                let sets = require_str(eobj, "sets").map_err(efield)?;
                let tag = require_str(eobj, "type").map_err(efield)?;
                let notes = require_str(eobj, "notes").map_err(efield)?;
                let kind =
                    MuscleGroup::parse(&tag).ok_or_else(|| ValidationError::UnknownType {
                        day: day_no,
                        zone: zone_no,
                        exercise: ex_no,
                        tag,
                    })?;

                out_exercises.push(Exercise {
                    name: ex_name,
                    sets,
                    kind,
                    notes,
                });
            }
            out_zones.push(GymZone {
                name,
                exercises: out_exercises,
            });
        }

        out.push(WorkoutDay {
            id,
            title,
            subtitle,
            theme,
            accent,
            bg_light,
            bg_dark,
            zones: out_zones,
        });
    }
    Ok(out)
}

/// Fixed zone label per muscle group, as the original app named its stations.
fn zone_label(group: MuscleGroup) -> &'static str {
    match group {
        MuscleGroup::Chest => "Zona Petto",
        MuscleGroup::Back => "Zona Schiena",
        MuscleGroup::Shoulders => "Zona Spalle",
        MuscleGroup::Biceps => "Zona Bicipiti",
        MuscleGroup::Triceps => "Zona Tricipiti",
        MuscleGroup::Legs => "Zona Gambe",
        MuscleGroup::Calves => "Zona Polpacci",
    }
}

/// Presentation tokens inferred from the day title. First matching bucket
/// wins; the order is load-bearing ("UPPER MIX + LEGS" must stay purple).
fn infer_theme(title: &str) -> (&'static str, &'static str, &'static str, &'static str) {
    let t = title.to_lowercase();
    if t.contains("push") {
        (
            "from-orange-500 to-red-600",
            "text-orange-600",
            "bg-orange-50",
            "dark:bg-orange-950/20",
        )
    } else if t.contains("pull") {
        (
            "from-blue-500 to-indigo-600",
            "text-blue-600",
            "bg-blue-50",
            "dark:bg-blue-950/20",
        )
    } else if t.contains("upper") || t.contains("mix") {
        (
            "from-purple-500 to-pink-600",
            "text-purple-600",
            "bg-purple-50",
            "dark:bg-purple-950/20",
        )
    } else if t.contains("leg") {
        (
            "from-emerald-500 to-teal-600",
            "text-emerald-600",
            "bg-emerald-50",
            "dark:bg-emerald-950/20",
        )
    } else {
        (
            "from-slate-500 to-slate-600",
            "text-slate-600",
            "bg-slate-50",
            "dark:bg-slate-950/20",
        )
    }
}

/// Expand a simplified plan into the internal schema: exercises grouped by
/// muscle tag in first-seen order, one zone per group, sequential 1-based
/// ids, theme inferred from the title.
pub fn simplified_to_internal(days: Vec<SimplifiedDay>) -> Vec<WorkoutDay> {
    days.into_iter()
        .enumerate()
        .map(|(idx, day)| {
            let mut groups: Vec<(MuscleGroup, Vec<Exercise>)> = Vec::new();
            for ex in day.esercizi {
                let exercise = Exercise {
                    name: ex.nome,
                    sets: ex.serie,
                    kind: ex.tipo,
                    notes: ex.note,
                };
                match groups.iter().position(|(g, _)| *g == exercise.kind) {
                    Some(i) => groups[i].1.push(exercise),
                    None => groups.push((exercise.kind, vec![exercise])),
                }
            }

            let (theme, accent, bg_light, bg_dark) = infer_theme(&day.title);
            WorkoutDay {
                id: idx as i64 + 1,
                title: day.title,
                subtitle: day.subtitle,
                theme: theme.into(),
                accent: accent.into(),
                bg_light: bg_light.into(),
                bg_dark: bg_dark.into(),
                zones: groups
                    .into_iter()
                    .map(|(group, exercises)| GymZone {
                        name: zone_label(group).into(),
                        exercises,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Flatten an internal collection back to the interchange shape, dropping
/// zone grouping, ids and presentation tokens.
pub fn internal_to_simplified(days: &[WorkoutDay]) -> Vec<SimplifiedDay> {
    days.iter()
        .map(|day| SimplifiedDay {
            title: day.title.clone(),
            subtitle: day.subtitle.clone(),
            esercizi: day
                .exercises()
                .map(|ex| SimplifiedExercise {
                    nome: ex.name.clone(),
                    serie: ex.sets.clone(),
                    tipo: ex.kind,
                    note: ex.notes.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Parse user-supplied file contents into a workout collection.
///
/// Staged: empty file, JSON syntax, top-level shape, format detection, then
/// either a generic conversion failure (simplified) or a field-level
/// validation error (internal).
pub fn import_collection(contents: &str) -> Result<Vec<WorkoutDay>, ImportError> {
    if contents.trim().is_empty() {
        return Err(ImportError::EmptyFile);
    }
    let data: Value = serde_json::from_str(contents).map_err(ImportError::Syntax)?;
    let days = data.as_array().ok_or(ImportError::NotAnArray)?;
    if days.is_empty() {
        return Err(ImportError::EmptyCollection);
    }

    match detect_format(days) {
        PlanFormat::Simplified => {
            let simplified: Vec<SimplifiedDay> = serde_json::from_value(data.clone())
                .map_err(|e| ImportError::Conversion(e.to_string()))?;
            Ok(simplified_to_internal(simplified))
        }
        PlanFormat::Internal => Ok(validate(&data)?),
    }
}

/// Serialize a collection for backup, always in the simplified shape.
pub fn export_collection(days: &[WorkoutDay]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&internal_to_simplified(days))
}

/// Default backup filename.
pub const EXPORT_FILENAME: &str = "abruscheda_backup.json";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_collection;

    fn as_value(days: &[WorkoutDay]) -> Value {
        serde_json::to_value(days).unwrap()
    }

    #[test]
    fn test_validate_accepts_default_collection() {
        let days = default_collection();
        let parsed = validate(&as_value(&days)).unwrap();
        assert_eq!(parsed, days);
    }

    #[test]
    fn test_validate_rejects_non_array() {
        let err = validate(&serde_json::json!({"id": 1})).unwrap_err();
        assert_eq!(err, ValidationError::NotAnArray);
    }

    #[test]
    fn test_validate_missing_day_field() {
        let mut value = as_value(&default_collection());
        value[1].as_object_mut().unwrap().remove("subtitle");
        let err = validate(&value).unwrap_err();
        assert_eq!(err, ValidationError::DayField { day: 2, field: "subtitle" });
        assert_eq!(err.to_string(), "day 2: missing or invalid field `subtitle`");
    }

    #[test]
    fn test_validate_missing_zone_field() {
        let mut value = as_value(&default_collection());
        value[0]["zones"][1].as_object_mut().unwrap().remove("exercises");
        let err = validate(&value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ZoneField { day: 1, zone: 2, field: "exercises" }
        );
    }

    #[test]
    fn test_validate_missing_exercise_field_is_indexed() {
        let mut value = as_value(&default_collection());
        value[0]["zones"][0]["exercises"][1]
            .as_object_mut()
            .unwrap()
            .remove("notes");
        let err = validate(&value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ExerciseField { day: 1, zone: 1, exercise: 2, field: "notes" }
        );
        assert_eq!(
            err.to_string(),
            "day 1, zone 1, exercise 2: missing or invalid field `notes`"
        );
    }

    #[test]
    fn test_validate_depth_first_reports_first_violation() {
        let mut value = as_value(&default_collection());
        // Break day 1 deep down and day 2 at the top: the day-1 error wins.
        value[0]["zones"][0]["exercises"][0]
            .as_object_mut()
            .unwrap()
            .remove("sets");
        value[1].as_object_mut().unwrap().remove("title");
        let err = validate(&value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ExerciseField { day: 1, zone: 1, exercise: 1, field: "sets" }
        );
    }

    #[test]
    fn test_validate_rejects_unknown_type_tag() {
        let mut value = as_value(&default_collection());
        value[0]["zones"][0]["exercises"][0]["type"] = "cardio".into();
        let err = validate(&value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownType {
                day: 1,
                zone: 1,
                exercise: 1,
                tag: "cardio".into()
            }
        );
    }

    #[test]
    fn test_validate_rejects_null_day() {
        let value = serde_json::json!([null]);
        assert_eq!(
            validate(&value).unwrap_err(),
            ValidationError::DayNotObject { day: 1 }
        );
    }

    #[test]
    fn test_detect_format() {
        let simplified = serde_json::json!([
            {"title": "A", "subtitle": "B", "esercizi": []}
        ]);
        assert_eq!(
            detect_format(simplified.as_array().unwrap()),
            PlanFormat::Simplified
        );

        let internal = as_value(&default_collection());
        assert_eq!(
            detect_format(internal.as_array().unwrap()),
            PlanFormat::Internal
        );

        // A day carrying both markers stays internal.
        let both = serde_json::json!([{"esercizi": [], "zones": []}]);
        assert_eq!(detect_format(both.as_array().unwrap()), PlanFormat::Internal);
    }

    #[test]
    fn test_simplified_grouping_keeps_first_seen_order() {
        let days = vec![SimplifiedDay {
            title: "GIORNO".into(),
            subtitle: "".into(),
            esercizi: vec![
                SimplifiedExercise {
                    nome: "Alzate".into(),
                    serie: "3 x 15".into(),
                    tipo: MuscleGroup::Shoulders,
                    note: "".into(),
                },
                SimplifiedExercise {
                    nome: "Panca".into(),
                    serie: "3 x 8".into(),
                    tipo: MuscleGroup::Chest,
                    note: "".into(),
                },
                SimplifiedExercise {
                    nome: "Military".into(),
                    serie: "4 x 6".into(),
                    tipo: MuscleGroup::Shoulders,
                    note: "".into(),
                },
            ],
        }];
        let internal = simplified_to_internal(days);
        let zones: Vec<&str> = internal[0].zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(zones, vec!["Zona Spalle", "Zona Petto"]);
        assert_eq!(internal[0].zones[0].exercises.len(), 2);
        assert_eq!(internal[0].zones[0].exercises[1].name, "Military");
    }

    #[test]
    fn test_theme_inference_buckets_and_priority() {
        assert_eq!(infer_theme("PUSH DAY").1, "text-orange-600");
        assert_eq!(infer_theme("Pull & Co").1, "text-blue-600");
        assert_eq!(infer_theme("upper body").1, "text-purple-600");
        assert_eq!(infer_theme("LEG DAY").1, "text-emerald-600");
        assert_eq!(infer_theme("Full Body").1, "text-slate-600");
        // Overlap: mix is checked before leg, so the purple bucket wins.
        assert_eq!(infer_theme("MIX LEGS").1, "text-purple-600");
    }

    #[test]
    fn test_roundtrip_preserves_exercise_fields() {
        let original = default_collection();
        let back = simplified_to_internal(internal_to_simplified(&original));

        assert_eq!(back.len(), original.len());
        for (a, b) in original.iter().zip(back.iter()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.subtitle, b.subtitle);
            let a_ex: Vec<_> = a.exercises().collect();
            // Regrouping reorders across zones but keeps each tag bucket in
            // first-seen order; compare as multisets of the preserved tuple.
            let mut a_tuples: Vec<_> = a_ex
                .iter()
                .map(|e| (e.name.clone(), e.sets.clone(), e.kind, e.notes.clone()))
                .collect();
            let mut b_tuples: Vec<_> = b
                .exercises()
                .map(|e| (e.name.clone(), e.sets.clone(), e.kind, e.notes.clone()))
                .collect();
            a_tuples.sort();
            b_tuples.sort();
            assert_eq!(a_tuples, b_tuples);
        }
    }

    #[test]
    fn test_export_shape_drops_internal_fields() {
        let json = export_collection(&default_collection()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert!(first.get("esercizi").is_some());
        assert!(first.get("zones").is_none());
        assert!(first.get("id").is_none());
        assert!(first.get("theme").is_none());
        assert_eq!(first["esercizi"][0]["nome"], "Panca Piana Bilanciere");
        assert_eq!(first["esercizi"][0]["serie"], "3 x 6-8");
        assert_eq!(first["esercizi"][0]["tipo"], "chest");
    }

    #[test]
    fn test_import_rejects_empty_content() {
        assert!(matches!(
            import_collection("   \n"),
            Err(ImportError::EmptyFile)
        ));
    }

    #[test]
    fn test_import_rejects_bad_json() {
        assert!(matches!(
            import_collection("{not json"),
            Err(ImportError::Syntax(_))
        ));
    }

    #[test]
    fn test_import_rejects_non_array_and_empty_array() {
        assert!(matches!(
            import_collection("{\"a\": 1}"),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(
            import_collection("[]"),
            Err(ImportError::EmptyCollection)
        ));
    }

    #[test]
    fn test_import_simplified_end_to_end() {
        let contents = r#"[{"title":"PUSH DAY","subtitle":"x",
            "esercizi":[{"nome":"Bench","serie":"3x8","tipo":"chest","note":"n"}]}]"#;
        let days = import_collection(contents).unwrap();
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.id, 1);
        assert_eq!(day.zones.len(), 1);
        assert_eq!(day.zones[0].name, "Zona Petto");
        assert_eq!(day.zones[0].exercises.len(), 1);
        assert_eq!(day.zones[0].exercises[0].name, "Bench");
        assert_eq!(day.accent, "text-orange-600");
    }

    #[test]
    fn test_import_simplified_bad_tag_is_generic_conversion_error() {
        let contents =
            r#"[{"title":"A","subtitle":"b","esercizi":[{"nome":"X","serie":"3","tipo":"cardio","note":""}]}]"#;
        assert!(matches!(
            import_collection(contents),
            Err(ImportError::Conversion(_))
        ));
    }

    #[test]
    fn test_import_internal_propagates_field_error() {
        let mut value = as_value(&default_collection());
        value[0]["zones"][0]["exercises"][1]
            .as_object_mut()
            .unwrap()
            .remove("notes");
        let contents = serde_json::to_string(&value).unwrap();
        match import_collection(&contents) {
            Err(ImportError::Validation(e)) => assert_eq!(
                e,
                ValidationError::ExerciseField { day: 1, zone: 1, exercise: 2, field: "notes" }
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
