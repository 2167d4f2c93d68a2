//! Diet-chart merge templater.
//!
//! Merging ignores the meals of the source charts: it averages their calorie
//! totals, shifts the average by a per-goal offset and lays the result out
//! over five fixed meal slots using static share, macro and food tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Weight Gain")]
    WeightGain,
    #[serde(rename = "Muscle Building")]
    MuscleBuilding,
    #[serde(rename = "Maintenance")]
    Maintenance,
    #[serde(rename = "Athletic Performance")]
    AthleticPerformance,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::WeightGain,
        Goal::MuscleBuilding,
        Goal::Maintenance,
        Goal::AthleticPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::WeightGain => "Weight Gain",
            Goal::MuscleBuilding => "Muscle Building",
            Goal::Maintenance => "Maintenance",
            Goal::AthleticPerformance => "Athletic Performance",
        }
    }

    pub fn calorie_offset(&self) -> i64 {
        match self {
            Goal::WeightLoss => -200,
            Goal::WeightGain => 300,
            Goal::MuscleBuilding => 250,
            Goal::Maintenance => 0,
            Goal::AthleticPerformance => 150,
        }
    }

    /// Share of daily calories per meal, in [`Meal::ALL`] order.
    pub fn meal_shares(&self) -> [f64; 5] {
        match self {
            Goal::WeightLoss => [0.30, 0.10, 0.35, 0.10, 0.15],
            Goal::MuscleBuilding => [0.25, 0.15, 0.30, 0.15, 0.15],
            _ => [0.25, 0.10, 0.35, 0.10, 0.20],
        }
    }

    fn macro_ratio(&self) -> MacroRatio {
        match self {
            Goal::WeightLoss => MacroRatio::new(0.35, 0.35, 0.30),
            Goal::WeightGain => MacroRatio::new(0.25, 0.50, 0.25),
            Goal::MuscleBuilding => MacroRatio::new(0.40, 0.35, 0.25),
            Goal::Maintenance | Goal::AthleticPerformance => MacroRatio::new(0.30, 0.45, 0.25),
        }
    }

    fn notes(&self, target: i64) -> [String; 4] {
        match self {
            Goal::WeightLoss => [
                format!("Calorie deficit optimized: {target} calories for sustainable weight loss"),
                "Larger breakfast (30%) and smaller dinner (15%) for better metabolism".to_string(),
                "High-protein meals (35-40%) to maintain muscle mass during weight loss".to_string(),
                "Meal timing optimized for fat burning and energy maintenance".to_string(),
            ],
            Goal::WeightGain => [
                format!("Calorie surplus optimized: {target} calories for healthy weight gain"),
                "Nutrient-dense, calorie-rich foods selected for efficient weight gain".to_string(),
                "Balanced meal distribution with emphasis on healthy fats (25%)".to_string(),
                "Protein intake optimized to support lean muscle growth".to_string(),
            ],
            Goal::MuscleBuilding => [
                format!("High-protein optimization: {target} calories for muscle synthesis"),
                "Protein intake increased to 40% for optimal muscle protein synthesis".to_string(),
                "Strategic carb timing around workouts for energy and recovery".to_string(),
                "Frequent meals (15% snacks) to maintain positive nitrogen balance".to_string(),
            ],
            Goal::AthleticPerformance => [
                format!("Performance-focused: {target} calories for peak athletic output"),
                "Carbohydrate emphasis (45%) for sustained energy and glycogen replenishment"
                    .to_string(),
                "Strategic meal timing for pre/post workout optimization".to_string(),
                "Enhanced hydration and electrolyte balance considerations".to_string(),
            ],
            Goal::Maintenance => [
                format!("Balanced maintenance: {target} calories for weight stability"),
                "Classic meal distribution (25-35-20%) for sustained energy".to_string(),
                "Balanced macronutrients (30-45-25%) for overall health".to_string(),
                "Focus on nutrient variety and meal satisfaction".to_string(),
            ],
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGoal(pub String);

impl fmt::Display for UnknownGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown goal '{}'", self.0)
    }
}

impl std::error::Error for UnknownGoal {}

impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Goal::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownGoal(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    MidMorning,
    Lunch,
    Evening,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 5] = [
        Meal::Breakfast,
        Meal::MidMorning,
        Meal::Lunch,
        Meal::Evening,
        Meal::Dinner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::MidMorning => "Mid-Morning",
            Meal::Lunch => "Lunch",
            Meal::Evening => "Evening",
            Meal::Dinner => "Dinner",
        }
    }

    pub fn time(&self) -> &'static str {
        match self {
            Meal::Breakfast => "7:00 AM",
            Meal::MidMorning => "10:00 AM",
            Meal::Lunch => "1:00 PM",
            Meal::Evening => "4:00 PM",
            Meal::Dinner => "7:00 PM",
        }
    }

    fn macro_ratio(&self) -> MacroRatio {
        match self {
            Meal::Breakfast => MacroRatio::new(0.25, 0.50, 0.25),
            Meal::MidMorning => MacroRatio::new(0.35, 0.45, 0.20),
            Meal::Lunch => MacroRatio::new(0.30, 0.45, 0.25),
            Meal::Evening => MacroRatio::new(0.40, 0.40, 0.20),
            Meal::Dinner => MacroRatio::new(0.35, 0.35, 0.30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MacroRatio {
    protein: f64,
    carbs: f64,
    fats: f64,
}

impl MacroRatio {
    const fn new(protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            protein,
            carbs,
            fats,
        }
    }

    fn average(self, other: MacroRatio) -> Self {
        Self {
            protein: (self.protein + other.protein) / 2.0,
            carbs: (self.carbs + other.carbs) / 2.0,
            fats: (self.fats + other.fats) / 2.0,
        }
    }
}

/// Macro grams for one meal. Serialized as `"P: 40g, C: 60g, F: 20g"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealMacros {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

pub const KCAL_PER_G_PROTEIN: i64 = 4;
pub const KCAL_PER_G_CARBS: i64 = 4;
pub const KCAL_PER_G_FAT: i64 = 9;

impl MealMacros {
    pub fn for_meal(calories: i64, meal: Meal, goal: Goal) -> Self {
        let ratio = meal.macro_ratio().average(goal.macro_ratio());
        let kcal = calories as f64;
        Self {
            protein_g: (kcal * ratio.protein / KCAL_PER_G_PROTEIN as f64).round_ties_even() as i64,
            carbs_g: (kcal * ratio.carbs / KCAL_PER_G_CARBS as f64).round_ties_even() as i64,
            fat_g: (kcal * ratio.fats / KCAL_PER_G_FAT as f64).round_ties_even() as i64,
        }
    }

    pub fn kcal(&self) -> i64 {
        self.protein_g * KCAL_PER_G_PROTEIN + self.carbs_g * KCAL_PER_G_CARBS + self.fat_g * KCAL_PER_G_FAT
    }
}

impl fmt::Display for MealMacros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P: {}g, C: {}g, F: {}g", self.protein_g, self.carbs_g, self.fat_g)
    }
}

impl Serialize for MealMacros {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Vegetarian,
    NonVegetarian,
}

impl Diet {
    /// Anything other than `non-vegetarian` is treated as vegetarian.
    pub fn from_preference(pref: &str) -> Self {
        if pref.trim().eq_ignore_ascii_case("non-vegetarian") {
            Diet::NonVegetarian
        } else {
            Diet::Vegetarian
        }
    }
}

/// The parts of a stored chart the merge reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSummary {
    pub total_calories: i64,
    pub dietary_preference: Option<String>,
}

impl ChartSummary {
    /// Reads the total from `chart_data.totalCalories`, then
    /// `chart_data.target_calories`, then `column_target`; the preference
    /// from `user_data.dietaryPreferences`.
    pub fn from_stored(chart_data: &Value, user_data: &Value, column_target: i64) -> Self {
        let total_calories = ["totalCalories", "target_calories"]
            .iter()
            .find_map(|key| chart_data.get(*key).and_then(calories_value))
            .unwrap_or(column_target);
        let dietary_preference = user_data
            .get("dietaryPreferences")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            total_calories,
            dietary_preference,
        }
    }
}

/// Largest daily total read from a stored chart document; anything outside
/// `0..=MAX_CHART_CALORIES` falls through to the next source.
pub const MAX_CHART_CALORIES: i64 = 100_000;

fn calories_value(v: &Value) -> Option<i64> {
    let f = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !f.is_finite() || f < 0.0 || f > MAX_CHART_CALORIES as f64 {
        return None;
    }
    Some(f.trunc() as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedMeal {
    pub time: &'static str,
    pub name: &'static str,
    pub calories: i64,
    pub foods: String,
    pub macros: MealMacros,
}

/// The `chart_data` document of a merged chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPlan {
    pub meals: Vec<MergedMeal>,
    pub total_calories: i64,
    pub goal: Goal,
    pub optimization_notes: Vec<String>,
    pub charts_used: usize,
    pub refinements: Vec<String>,
}

pub const DEFAULT_PREFERENCE: &str = "vegetarian";

pub fn merged_chart_name(goal: Goal, charts: usize) -> String {
    format!("Merged Diet Plan - {goal} ({charts} charts)")
}

/// Target calories: integer average of the totals shifted by the goal
/// offset, never below zero.
pub fn target_calories(charts: &[ChartSummary], goal: Goal) -> Option<i64> {
    if charts.is_empty() {
        return None;
    }
    // Column totals are not range-checked, so sum wide.
    let sum: i128 = charts.iter().map(|c| i128::from(c.total_calories)).sum();
    let avg = sum.div_euclid(charts.len() as i128);
    let target = (avg + i128::from(goal.calorie_offset())).max(0);
    Some(i64::try_from(target).unwrap_or(i64::MAX))
}

/// Builds the merged plan; `None` when there is nothing to merge.
pub fn merge(charts: &[ChartSummary], goal: Goal) -> Option<MergedPlan> {
    let target = target_calories(charts, goal)?;
    let preference = charts
        .first()
        .and_then(|c| c.dietary_preference.clone())
        .unwrap_or_else(|| DEFAULT_PREFERENCE.to_string());
    let diet = Diet::from_preference(&preference);

    let meals = Meal::ALL
        .iter()
        .zip(goal.meal_shares())
        .map(|(&meal, share)| {
            // Guards against 1800 * 0.3 landing a hair under 540.
            let calories = (target as f64 * share + 1e-9).floor() as i64;
            MergedMeal {
                time: meal.time(),
                name: meal.name(),
                calories,
                foods: food_options(meal, diet, goal).join(", "),
                macros: MealMacros::for_meal(calories, meal, goal),
            }
        })
        .collect();

    let n = charts.len();
    let mut optimization_notes = vec![
        format!("AI-powered merge of {n} personalized diet charts"),
        format!("Goal-specific optimization for {goal} with {preference} preferences"),
        "Progressive refinement algorithm applied for maximum effectiveness".to_string(),
        "Scientifically-backed macro and calorie distribution".to_string(),
        "Meal variety optimized to prevent dietary boredom".to_string(),
    ];
    optimization_notes.extend(goal.notes(target));

    Some(MergedPlan {
        meals,
        total_calories: target,
        goal,
        optimization_notes,
        charts_used: n,
        refinements: vec![
            format!("Intelligently merged {n} diet charts for {goal}"),
            format!("Goal-optimized calorie distribution: {target} total calories"),
            format!("Customized for {preference} dietary preferences"),
            "Meal-specific food variety and nutritional balance".to_string(),
            "Optimized meal timing for metabolic efficiency".to_string(),
        ],
    })
}

/// Three suggested dishes for a meal slot.
#[rustfmt::skip]
pub fn food_options(meal: Meal, diet: Diet, goal: Goal) -> [&'static str; 3] {
    use Diet::*;
    use Goal::*;
    use Meal::*;
    match (meal, diet, goal) {
        (Breakfast, Vegetarian, WeightLoss) => ["Greek yogurt with berries and nuts", "Vegetable omelet with whole grain toast", "Oatmeal with protein powder and fruits"],
        (Breakfast, Vegetarian, WeightGain) => ["Protein smoothie with banana and peanut butter", "Avocado toast with eggs", "Granola with full-fat yogurt and nuts"],
        (Breakfast, Vegetarian, MuscleBuilding) => ["Protein pancakes with Greek yogurt", "Scrambled eggs with quinoa and vegetables", "Cottage cheese with fruits and nuts"],
        (Breakfast, Vegetarian, Maintenance) => ["Balanced oatmeal with fruits and nuts", "Vegetable omelet with whole grain bread", "Greek yogurt parfait"],
        (Breakfast, Vegetarian, AthleticPerformance) => ["High-protein smoothie bowl", "Energy-dense oatmeal with nuts and seeds", "Protein-rich egg scramble"],
        (Breakfast, NonVegetarian, WeightLoss) => ["Egg white omelet with vegetables", "Grilled chicken with avocado", "Protein smoothie with berries"],
        (Breakfast, NonVegetarian, WeightGain) => ["Whole eggs with turkey bacon", "Protein pancakes with chicken sausage", "High-calorie smoothie with protein"],
        (Breakfast, NonVegetarian, MuscleBuilding) => ["Lean beef with sweet potato hash", "Chicken and egg scramble", "Protein-packed omelet with lean meat"],
        (Breakfast, NonVegetarian, Maintenance) => ["Balanced egg and meat breakfast", "Chicken with whole grain toast", "Protein smoothie with lean meat"],
        (Breakfast, NonVegetarian, AthleticPerformance) => ["High-protein meat and egg combo", "Performance smoothie with whey", "Lean meat with complex carbs"],

        (MidMorning, Vegetarian, WeightLoss) => ["Apple with almond butter", "Greek yogurt with cucumber", "Mixed nuts and seeds"],
        (MidMorning, Vegetarian, WeightGain) => ["Trail mix with dried fruits", "Protein bar with nuts", "Smoothie with protein powder"],
        (MidMorning, Vegetarian, MuscleBuilding) => ["Protein shake with banana", "Cottage cheese with nuts", "Greek yogurt with granola"],
        (MidMorning, Vegetarian, Maintenance) => ["Fresh fruit with nuts", "Yogurt with berries", "Healthy granola bar"],
        (MidMorning, Vegetarian, AthleticPerformance) => ["Energy balls with dates and nuts", "Protein smoothie", "Mixed nuts and dried fruits"],
        (MidMorning, NonVegetarian, WeightLoss) => ["Hard-boiled eggs", "Turkey jerky", "Protein shake"],
        (MidMorning, NonVegetarian, WeightGain) => ["Protein bar with nuts", "Chicken salad wrap", "High-calorie smoothie"],
        (MidMorning, NonVegetarian, MuscleBuilding) => ["Whey protein shake", "Lean meat snack", "Protein-rich energy bar"],
        (MidMorning, NonVegetarian, Maintenance) => ["Balanced protein snack", "Lean meat with crackers", "Protein smoothie"],
        (MidMorning, NonVegetarian, AthleticPerformance) => ["Performance protein bar", "Lean meat snack", "High-protein smoothie"],

        (Lunch, Vegetarian, WeightLoss) => ["Large salad with quinoa and chickpeas", "Vegetable curry with brown rice", "Lentil soup with whole grain bread"],
        (Lunch, Vegetarian, WeightGain) => ["Quinoa bowl with avocado and nuts", "Pasta with creamy vegetable sauce", "Rice and dal with ghee"],
        (Lunch, Vegetarian, MuscleBuilding) => ["Protein-rich lentil curry with quinoa", "Paneer with vegetables and rice", "High-protein pasta with cheese"],
        (Lunch, Vegetarian, Maintenance) => ["Balanced dal-rice with vegetables", "Quinoa salad with mixed vegetables", "Vegetable curry with roti"],
        (Lunch, Vegetarian, AthleticPerformance) => ["Power bowl with quinoa and legumes", "High-energy vegetable curry", "Performance pasta with vegetables"],
        (Lunch, NonVegetarian, WeightLoss) => ["Grilled chicken salad with vegetables", "Fish with steamed vegetables", "Lean meat with quinoa"],
        (Lunch, NonVegetarian, WeightGain) => ["Chicken curry with rice", "Fish with sweet potato", "Meat with pasta and sauce"],
        (Lunch, NonVegetarian, MuscleBuilding) => ["Grilled chicken with brown rice", "Salmon with quinoa and vegetables", "Lean beef with sweet potato"],
        (Lunch, NonVegetarian, Maintenance) => ["Balanced chicken with rice and vegetables", "Fish with mixed grains", "Lean meat with balanced sides"],
        (Lunch, NonVegetarian, AthleticPerformance) => ["High-protein chicken bowl", "Performance fish with complex carbs", "Power meat and grain combo"],

        (Evening, Vegetarian, WeightLoss) => ["Roasted chickpeas", "Vegetable sticks with hummus", "Green tea with almonds"],
        (Evening, Vegetarian, WeightGain) => ["Protein smoothie with nuts", "Granola with yogurt", "Nut butter with fruits"],
        (Evening, Vegetarian, MuscleBuilding) => ["Protein bar with nuts", "Greek yogurt with granola", "Cottage cheese with fruits"],
        (Evening, Vegetarian, Maintenance) => ["Mixed nuts and fruits", "Healthy snack bar", "Yogurt with berries"],
        (Evening, Vegetarian, AthleticPerformance) => ["Energy-dense nuts and seeds", "Performance snack bar", "High-protein smoothie"],
        (Evening, NonVegetarian, WeightLoss) => ["Grilled chicken strips", "Hard-boiled eggs", "Protein shake"],
        (Evening, NonVegetarian, WeightGain) => ["Protein bar with meat", "Chicken salad", "High-calorie smoothie"],
        (Evening, NonVegetarian, MuscleBuilding) => ["Lean meat snack", "Protein shake with extras", "Chicken with crackers"],
        (Evening, NonVegetarian, Maintenance) => ["Balanced protein snack", "Lean meat portion", "Protein smoothie"],
        (Evening, NonVegetarian, AthleticPerformance) => ["Performance meat snack", "High-protein bar", "Power smoothie"],

        (Dinner, Vegetarian, WeightLoss) => ["Vegetable curry with small roti", "Lentil soup with salad", "Grilled vegetables with quinoa"],
        (Dinner, Vegetarian, WeightGain) => ["Dal with rice and ghee", "Paneer curry with naan", "Pasta with creamy sauce"],
        (Dinner, Vegetarian, MuscleBuilding) => ["High-protein dal with quinoa", "Paneer with vegetables and rice", "Protein-rich curry with bread"],
        (Dinner, Vegetarian, Maintenance) => ["Balanced vegetable curry with roti", "Dal-rice with vegetables", "Quinoa with mixed curry"],
        (Dinner, Vegetarian, AthleticPerformance) => ["Power vegetable curry", "High-energy dal-rice combo", "Performance quinoa bowl"],
        (Dinner, NonVegetarian, WeightLoss) => ["Grilled fish with vegetables", "Chicken soup with salad", "Lean meat with steamed vegetables"],
        (Dinner, NonVegetarian, WeightGain) => ["Chicken curry with rice", "Fish with creamy sauce", "Meat with pasta"],
        (Dinner, NonVegetarian, MuscleBuilding) => ["Grilled chicken with sweet potato", "Salmon with quinoa", "Lean beef with vegetables"],
        (Dinner, NonVegetarian, Maintenance) => ["Balanced chicken with rice", "Fish with mixed vegetables", "Lean meat with grains"],
        (Dinner, NonVegetarian, AthleticPerformance) => ["High-protein fish dinner", "Performance chicken bowl", "Power meat with complex carbs"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(total: i64) -> ChartSummary {
        ChartSummary {
            total_calories: total,
            dietary_preference: None,
        }
    }

    #[test]
    fn weight_loss_merge_of_1800_and_2200() {
        let plan = merge(&[chart(1800), chart(2200)], Goal::WeightLoss).unwrap();
        assert_eq!(plan.total_calories, 1800);
        assert_eq!(plan.meals[0].name, "Breakfast");
        assert_eq!(plan.meals[0].time, "7:00 AM");
        assert_eq!(plan.meals[0].calories, 540);
        assert_eq!(plan.charts_used, 2);
        assert_eq!(plan.optimization_notes.len(), 9);
        assert_eq!(plan.refinements.len(), 5);
    }

    #[test]
    fn oversized_document_totals_fall_back_to_column() {
        for total in [json!(1e300), json!(-5), json!("1e308"), json!(100_001)] {
            let summary = ChartSummary::from_stored(&json!({ "totalCalories": total }), &json!({}), 2000);
            assert_eq!(summary.total_calories, 2000, "{total}");
        }
        let plan = merge(
            &[ChartSummary::from_stored(&json!({ "totalCalories": 1e300 }), &json!({}), 0)],
            Goal::WeightGain,
        )
        .unwrap();
        assert_eq!(plan.total_calories, 300);
    }

    #[test]
    fn extreme_column_totals_do_not_overflow() {
        let charts = [chart(i64::MAX), chart(i64::MAX)];
        assert_eq!(target_calories(&charts, Goal::WeightGain), Some(i64::MAX));
        assert_eq!(target_calories(&[chart(i64::MIN)], Goal::WeightLoss), Some(0));
    }

    #[test]
    fn base_notes_open_the_optimization_list() {
        let plan = merge(&[chart(2000)], Goal::Maintenance).unwrap();
        assert_eq!(plan.optimization_notes[0], "AI-powered merge of 1 personalized diet charts");
        assert_eq!(plan.optimization_notes[3], "Scientifically-backed macro and calorie distribution");
    }

    #[test]
    fn empty_input_merges_to_nothing() {
        assert!(merge(&[], Goal::Maintenance).is_none());
    }

    #[test]
    fn shares_sum_to_one_for_every_goal() {
        for goal in Goal::ALL {
            let sum: f64 = goal.meal_shares().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{goal}");
        }
    }

    #[test]
    fn offsets_apply_to_integer_average() {
        let charts = [chart(2001), chart(2000)];
        assert_eq!(target_calories(&charts, Goal::Maintenance), Some(2000));
        assert_eq!(target_calories(&charts, Goal::WeightGain), Some(2300));
        assert_eq!(target_calories(&charts, Goal::MuscleBuilding), Some(2250));
        assert_eq!(target_calories(&charts, Goal::AthleticPerformance), Some(2150));
    }

    #[test]
    fn macro_grams_round_trip_to_meal_calories() {
        for goal in Goal::ALL {
            for meal in Meal::ALL {
                for calories in [150, 333, 540, 777, 1000] {
                    let m = MealMacros::for_meal(calories, meal, goal);
                    // Rounding each macro moves at most half a gram.
                    let tolerance = (KCAL_PER_G_PROTEIN + KCAL_PER_G_CARBS + KCAL_PER_G_FAT) / 2 + 1;
                    assert!((m.kcal() - calories).abs() <= tolerance, "{goal} {meal:?} {calories}");
                }
            }
        }
    }

    #[test]
    fn macros_render_as_compact_string() {
        let m = MealMacros::for_meal(800, Meal::Lunch, Goal::Maintenance);
        assert_eq!(m.to_string(), "P: 60g, C: 90g, F: 22g");
        assert_eq!(serde_json::to_value(m).unwrap(), json!("P: 60g, C: 90g, F: 22g"));
    }

    #[test]
    fn non_vegetarian_preference_changes_foods() {
        let mut meat = chart(2000);
        meat.dietary_preference = Some("non-vegetarian".into());
        let plan = merge(&[meat], Goal::MuscleBuilding).unwrap();
        assert_eq!(
            plan.meals[2].foods,
            "Grilled chicken with brown rice, Salmon with quinoa and vegetables, Lean beef with sweet potato"
        );
        assert!(plan.refinements[2].contains("non-vegetarian"));
    }

    #[test]
    fn unknown_preference_falls_back_to_vegetarian() {
        assert_eq!(Diet::from_preference("vegan"), Diet::Vegetarian);
        assert_eq!(Diet::from_preference("Non-Vegetarian"), Diet::NonVegetarian);
    }

    #[test]
    fn goal_parses_known_labels_only() {
        assert_eq!("Weight Loss".parse::<Goal>(), Ok(Goal::WeightLoss));
        assert_eq!(" maintenance ".parse::<Goal>(), Ok(Goal::Maintenance));
        assert!("Bulking".parse::<Goal>().is_err());
    }

    #[test]
    fn summary_prefers_total_then_target_then_column() {
        let user = json!({"dietaryPreferences": "vegetarian"});
        let a = ChartSummary::from_stored(&json!({"totalCalories": 2100}), &user, 1);
        let b = ChartSummary::from_stored(&json!({"target_calories": "1900"}), &user, 1);
        let c = ChartSummary::from_stored(&json!({"meals": []}), &json!({}), 1700);
        assert_eq!(a.total_calories, 2100);
        assert_eq!(b.total_calories, 1900);
        assert_eq!(c.total_calories, 1700);
        assert_eq!(a.dietary_preference.as_deref(), Some("vegetarian"));
        assert_eq!(c.dietary_preference, None);
    }

    #[test]
    fn plan_serializes_with_camel_case_keys() {
        let plan = merge(&[chart(2000)], Goal::Maintenance).unwrap();
        let v = serde_json::to_value(&plan).unwrap();
        assert_eq!(v["totalCalories"], json!(2000));
        assert_eq!(v["goal"], json!("Maintenance"));
        assert_eq!(v["chartsUsed"], json!(1));
        assert_eq!(v["meals"].as_array().unwrap().len(), 5);
        assert!(v["optimizationNotes"].is_array());
    }
}
