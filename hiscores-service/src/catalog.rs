//! Fixed name catalogs for skills, activities and bosses.
//!
//! These lists are the universe for argument validation and for the skill
//! dimension of player comparisons. Names are the lowercase snake_case keys
//! used throughout the canonical model.

/// All 24 hiscore skills, in hiscore table order.
pub const SKILLS: [&str; 24] = [
    "overall",
    "attack",
    "defence",
    "strength",
    "hitpoints",
    "ranged",
    "prayer",
    "magic",
    "cooking",
    "woodcutting",
    "fletching",
    "fishing",
    "firemaking",
    "crafting",
    "smithing",
    "mining",
    "herblore",
    "agility",
    "thieving",
    "slayer",
    "farming",
    "runecrafting",
    "hunter",
    "construction",
];

/// Clue scrolls and minigames that have their own leaderboard.
pub const ACTIVITIES: &[&str] = &[
    "clue_scrolls_all",
    "clue_scrolls_beginner",
    "clue_scrolls_easy",
    "clue_scrolls_medium",
    "clue_scrolls_hard",
    "clue_scrolls_elite",
    "clue_scrolls_master",
    "lms_rank",
    "bounty_hunter_hunter",
    "bounty_hunter_rogue",
    "soul_wars_zeal",
];

/// Bosses that have their own leaderboard.
pub const BOSSES: &[&str] = &[
    "abyssal_sire",
    "alchemical_hydra",
    "barrows_chests",
    "bryophyta",
    "callisto",
    "cerberus",
    "chambers_of_xeric",
    "chambers_of_xeric_challenge_mode",
    "chaos_elemental",
    "chaos_fanatic",
    "commander_zilyana",
    "corporeal_beast",
    "crazy_archaeologist",
    "dagannoth_prime",
    "dagannoth_rex",
    "dagannoth_supreme",
    "deranged_archaeologist",
    "general_graardor",
    "giant_mole",
    "grotesque_guardians",
    "hespori",
    "kalphite_queen",
    "king_black_dragon",
    "kraken",
    "kreearra",
    "kril_tsutsaroth",
    "mimic",
    "nex",
    "nightmare",
    "phosanis_nightmare",
    "obor",
    "sarachnis",
    "scorpia",
    "skotizo",
    "tempoross",
    "the_gauntlet",
    "the_corrupted_gauntlet",
    "theatre_of_blood",
    "theatre_of_blood_hard_mode",
    "thermonuclear_smoke_devil",
    "tzkal_zuk",
    "tztok_jad",
    "venenatis",
    "vetion",
    "vorkath",
    "wintertodt",
    "zalcano",
    "zulrah",
];

/// Look up a skill by name, ignoring case.
pub fn find_skill(name: &str) -> Option<&'static str> {
    SKILLS
        .iter()
        .copied()
        .find(|skill| skill.eq_ignore_ascii_case(name))
}

/// Look up an activity or boss by name, ignoring case.
pub fn find_activity(name: &str) -> Option<&'static str> {
    activity_names().find(|activity| activity.eq_ignore_ascii_case(name))
}

/// Activities followed by bosses.
pub fn activity_names() -> impl Iterator<Item = &'static str> {
    ACTIVITIES.iter().chain(BOSSES.iter()).copied()
}

/// Hiscore table id of a skill.
pub fn skill_table(skill: &str) -> Option<usize> {
    SKILLS.iter().position(|s| *s == skill)
}

/// Hiscore table id of an activity or boss.
pub fn activity_table(activity: &str) -> Option<usize> {
    ACTIVITY_TABLES
        .iter()
        .find(|(key, _)| *key == activity)
        .map(|(_, table)| *table)
}

/// Table id of the first boss row; rows below it are activities.
pub const FIRST_BOSS_TABLE: usize = 19;

/// Every activity row of the hiscores, keyed by table id.
///
/// Ids follow the row order of `index_lite`, which is also the `table`
/// parameter of `ranking.json` in category 1. Jagex inserts new rows in
/// alphabetical position, so additions shift every later id.
pub const ACTIVITY_TABLES: &[(&str, usize)] = &[
    ("league_points", 0),
    ("deadman_points", 1),
    ("bounty_hunter_hunter", 2),
    ("bounty_hunter_rogue", 3),
    ("bounty_hunter_legacy_hunter", 4),
    ("bounty_hunter_legacy_rogue", 5),
    ("clue_scrolls_all", 6),
    ("clue_scrolls_beginner", 7),
    ("clue_scrolls_easy", 8),
    ("clue_scrolls_medium", 9),
    ("clue_scrolls_hard", 10),
    ("clue_scrolls_elite", 11),
    ("clue_scrolls_master", 12),
    ("lms_rank", 13),
    ("pvp_arena_rank", 14),
    ("soul_wars_zeal", 15),
    ("rifts_closed", 16),
    ("colosseum_glory", 17),
    ("collections_logged", 18),
    ("abyssal_sire", 19),
    ("alchemical_hydra", 20),
    ("amoxliatl", 21),
    ("araxxor", 22),
    ("artio", 23),
    ("barrows_chests", 24),
    ("bryophyta", 25),
    ("callisto", 26),
    ("calvarion", 27),
    ("cerberus", 28),
    ("chambers_of_xeric", 29),
    ("chambers_of_xeric_challenge_mode", 30),
    ("chaos_elemental", 31),
    ("chaos_fanatic", 32),
    ("commander_zilyana", 33),
    ("corporeal_beast", 34),
    ("crazy_archaeologist", 35),
    ("dagannoth_prime", 36),
    ("dagannoth_rex", 37),
    ("dagannoth_supreme", 38),
    ("deranged_archaeologist", 39),
    ("doom_of_mokhaiotl", 40),
    ("duke_sucellus", 41),
    ("general_graardor", 42),
    ("giant_mole", 43),
    ("grotesque_guardians", 44),
    ("hespori", 45),
    ("kalphite_queen", 46),
    ("king_black_dragon", 47),
    ("kraken", 48),
    ("kreearra", 49),
    ("kril_tsutsaroth", 50),
    ("lunar_chests", 51),
    ("mimic", 52),
    ("nex", 53),
    ("nightmare", 54),
    ("phosanis_nightmare", 55),
    ("obor", 56),
    ("phantom_muspah", 57),
    ("sarachnis", 58),
    ("scorpia", 59),
    ("scurrius", 60),
    ("skotizo", 61),
    ("sol_heredit", 62),
    ("spindel", 63),
    ("tempoross", 64),
    ("the_gauntlet", 65),
    ("the_corrupted_gauntlet", 66),
    ("the_hueycoatl", 67),
    ("the_leviathan", 68),
    ("the_royal_titans", 69),
    ("the_whisperer", 70),
    ("theatre_of_blood", 71),
    ("theatre_of_blood_hard_mode", 72),
    ("thermonuclear_smoke_devil", 73),
    ("tombs_of_amascut", 74),
    ("tombs_of_amascut_expert_mode", 75),
    ("tzkal_zuk", 76),
    ("tztok_jad", 77),
    ("vardorvis", 78),
    ("venenatis", 79),
    ("vetion", 80),
    ("vorkath", 81),
    ("wintertodt", 82),
    ("yama", 83),
    ("zalcano", 84),
    ("zulrah", 85),
];

/// Highest level a single skill can reach.
pub const MAX_LEVEL: i64 = 99;

/// Skill level for an amount of experience, capped at [`MAX_LEVEL`].
///
/// Uses the standard experience curve: reaching level `L` takes
/// `floor(sum(floor(n + 300 * 2^(n / 7))) / 4)` for `n` in `1..L`.
pub fn level_for_experience(experience: i64) -> i64 {
    let mut points = 0i64;
    for level in 1..MAX_LEVEL {
        let n = level as f64;
        points += (n + 300.0 * 2f64.powf(n / 7.0)).floor() as i64;
        if points / 4 > experience {
            return level;
        }
    }
    MAX_LEVEL
}
