//! Built-in workout collection - used until a custom plan is imported

use crate::model::{Exercise, GymZone, MuscleGroup, WorkoutDay};

fn ex(name: &str, sets: &str, kind: MuscleGroup, notes: &str) -> Exercise {
    Exercise {
        name: name.into(),
        sets: sets.into(),
        kind,
        notes: notes.into(),
    }
}

fn zone(name: &str, exercises: Vec<Exercise>) -> GymZone {
    GymZone { name: name.into(), exercises }
}

/// The stock four-day split shipped with the app.
pub fn default_collection() -> Vec<WorkoutDay> {
    vec![
        WorkoutDay {
            id: 1,
            title: "PUSH".into(),
            subtitle: "Focus: Spinta & Ipertrofia".into(),
            theme: "from-orange-500 to-red-600".into(),
            accent: "text-orange-600".into(),
            bg_light: "bg-orange-50".into(),
            bg_dark: "dark:bg-orange-950/20".into(),
            zones: vec![
                zone(
                    "Zona Panche",
                    vec![
                        ex(
                            "Panca Piana Bilanciere",
                            "3 x 6-8",
                            MuscleGroup::Chest,
                            "Esercizio base, massima forza",
                        ),
                        ex(
                            "Croci con Manubri (Piana)",
                            "3 x 12",
                            MuscleGroup::Chest,
                            "Usa la stessa panca di prima",
                        ),
                    ],
                ),
                zone(
                    "Zona Macchine",
                    vec![
                        ex(
                            "Chest Press Inclinata",
                            "4 x 8-10",
                            MuscleGroup::Chest,
                            "Ti sposti ai macchinari",
                        ),
                        ex(
                            "Pec Deck (Butterfly)",
                            "3 x 12",
                            MuscleGroup::Chest,
                            "Isolamento finale petto",
                        ),
                        ex(
                            "Dips (Parallele)",
                            "3 x Max",
                            MuscleGroup::Chest,
                            "Ultimo sforzo di spinta",
                        ),
                    ],
                ),
                zone(
                    "Zona Spalle & Tricipiti",
                    vec![
                        ex(
                            "Alzate Laterali Manubri",
                            "3 x 15",
                            MuscleGroup::Shoulders,
                            "Focus deltoide laterale",
                        ),
                        ex(
                            "French Press + Extension",
                            "3 x 10+10",
                            MuscleGroup::Triceps,
                            "Superset con manubri su panca",
                        ),
                    ],
                ),
            ],
        },
        WorkoutDay {
            id: 2,
            title: "PULL".into(),
            subtitle: "Focus: Tirata & Schiena Spessa".into(),
            theme: "from-blue-500 to-indigo-600".into(),
            accent: "text-blue-600".into(),
            bg_light: "bg-blue-50".into(),
            bg_dark: "dark:bg-blue-950/20".into(),
            zones: vec![
                zone(
                    "Zona Alto Cavo",
                    vec![
                        ex(
                            "Lat Machine Presa Larga",
                            "4 x 8-10",
                            MuscleGroup::Back,
                            "Focus gran dorsale",
                        ),
                        ex(
                            "Pullover al Cavo Alto",
                            "3 x 15",
                            MuscleGroup::Back,
                            "Stessa stazione, cambia impugnatura (corda)",
                        ),
                    ],
                ),
                zone(
                    "Zona Row",
                    vec![
                        ex(
                            "Pulley Basso (Stretto)",
                            "4 x 10",
                            MuscleGroup::Back,
                            "Stazione di vogata",
                        ),
                        ex(
                            "Rematore Unilaterale Machine",
                            "3 x 10 per lato",
                            MuscleGroup::Back,
                            "Focus spessore schiena",
                        ),
                    ],
                ),
                zone(
                    "Bassa Schiena & Bicipiti",
                    vec![
                        ex(
                            "Iperextensions",
                            "4 x 12-15",
                            MuscleGroup::Back,
                            "Fondamentale per la tua carenza",
                        ),
                        ex(
                            "Bicep Curl Machine",
                            "4 x 10-12",
                            MuscleGroup::Biceps,
                            "Alla tua macchina preferita",
                        ),
                        ex(
                            "Hammer Curl Manubri",
                            "3 x 10",
                            MuscleGroup::Biceps,
                            "Falli anche seduto vicino alla macchina",
                        ),
                    ],
                ),
            ],
        },
        WorkoutDay {
            id: 3,
            title: "UPPER FOCUS".into(),
            subtitle: "Focus: Mix Carenze & Arm Killer".into(),
            theme: "from-purple-500 to-pink-600".into(),
            accent: "text-purple-600".into(),
            bg_light: "bg-purple-50".into(),
            bg_dark: "dark:bg-purple-950/20".into(),
            zones: vec![
                zone(
                    "Zona Macchine",
                    vec![
                        ex(
                            "Chest Press Orizzontale",
                            "3 x 10",
                            MuscleGroup::Chest,
                            "Inizia col petto (punto debole)",
                        ),
                        ex(
                            "Lat Machine Inversa",
                            "4 x 10",
                            MuscleGroup::Back,
                            "Alterna spinta e tirata",
                        ),
                    ],
                ),
                zone(
                    "Zona Panche & Macchine",
                    vec![
                        ex(
                            "Panca Inclinata Manubri",
                            "3 x 10-12",
                            MuscleGroup::Chest,
                            "Zona panche",
                        ),
                        ex("Vertical Row", "3 x 10", MuscleGroup::Back, "Zona macchine"),
                    ],
                ),
                zone(
                    "Stazione Cavi (Multi-task)",
                    vec![
                        ex(
                            "Face Pull ai Cavi",
                            "3 x 15",
                            MuscleGroup::Shoulders,
                            "Posteriore spalle",
                        ),
                        ex(
                            "Bicep Curl Machine",
                            "3 x 10 + Rest-Pause",
                            MuscleGroup::Biceps,
                            "15\" pausa tra i micro-set finali",
                        ),
                        ex(
                            "Pushdown Tricipiti",
                            "3 x 12",
                            MuscleGroup::Triceps,
                            "Cavo alto - Stesso gancio per dopo",
                        ),
                        ex(
                            "Curl Bicipiti",
                            "3 x 12",
                            MuscleGroup::Biceps,
                            "Sposta il gancio in basso e chiudi",
                        ),
                    ],
                ),
            ],
        },
        WorkoutDay {
            id: 4,
            title: "LEGS".into(),
            subtitle: "Focus: Forza & Volume Gambe".into(),
            theme: "from-emerald-500 to-teal-600".into(),
            accent: "text-emerald-600".into(),
            bg_light: "bg-emerald-50".into(),
            bg_dark: "dark:bg-emerald-950/20".into(),
            zones: vec![
                zone(
                    "Zona Potenza",
                    vec![
                        ex(
                            "Squat al Macchinario",
                            "4 x 8-10",
                            MuscleGroup::Legs,
                            "Hack squat o Smith Machine, massima profondità",
                        ),
                        ex(
                            "Leg Press 45°",
                            "3 x 12",
                            MuscleGroup::Legs,
                            "Piedi medi, focus spinta di tallone",
                        ),
                    ],
                ),
                zone(
                    "Zona Isolamento",
                    vec![
                        ex(
                            "Leg Extension",
                            "4 x 15",
                            MuscleGroup::Legs,
                            "Contrazione di 1 secondo in alto",
                        ),
                        ex(
                            "Leg Curl (Seduto/Sdraiato)",
                            "4 x 12",
                            MuscleGroup::Legs,
                            "Focus femorali, controlla il ritorno",
                        ),
                    ],
                ),
                zone(
                    "Zona Polpacci",
                    vec![ex(
                        "Polpacci al Macchinario",
                        "4 x 20",
                        MuscleGroup::Calves,
                        "Massimo stretching nella fase bassa",
                    )],
                ),
            ],
        },
    ]
}
