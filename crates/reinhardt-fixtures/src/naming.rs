//! Naming convention helpers.
//!
//! Fixture files are named after tables (`user_profiles.json`), while the
//! schema describes relations per entity (`UserProfile`) and per
//! camelCase relation name (`userRoles`). These helpers convert between the
//! three forms.

/// Irregular plural → singular pairs, matched on the last word.
const IRREGULAR: &[(&str, &str)] = &[
	("people", "person"),
	("children", "child"),
	("men", "man"),
	("women", "woman"),
	("mice", "mouse"),
	("geese", "goose"),
	("feet", "foot"),
	("teeth", "tooth"),
];

/// Words whose plural and singular are the same.
const UNCOUNTABLE: &[&str] = &[
	"data",
	"equipment",
	"information",
	"media",
	"metadata",
	"news",
	"series",
	"sheep",
	"species",
];

/// Singulars ending in `ie`, whose plural would otherwise read as `-y` + `ies`.
const IE_SINGULARS: &[&str] = &[
	"auntie", "brownie", "calorie", "cookie", "genie", "hoodie", "movie", "newbie", "prairie",
	"rookie", "selfie", "smoothie", "zombie",
];

/// Plurals ending in `oes` that only add `s`.
const OE_PLURALS: &[&str] = &["canoes", "foes", "hoes", "oboes", "shoes", "tiptoes", "toes"];

/// Singulars ending in `s` that take `es` in the plural.
const ES_AFTER_S: &[&str] = &[
	"alias", "atlas", "bonus", "bus", "campus", "canvas", "census", "gas", "lens", "status",
	"virus",
];

/// Derives the owning entity name from a table name.
///
/// # Examples
///
/// ```
/// use reinhardt_fixtures::naming::entity_name;
///
/// assert_eq!(entity_name("users"), "User");
/// assert_eq!(entity_name("user_profiles"), "UserProfile");
/// assert_eq!(entity_name("categories"), "Category");
/// assert_eq!(entity_name("people"), "Person");
/// ```
pub fn entity_name(table: &str) -> String {
	let snake = to_snake_case(table);
	let (head, last) = match snake.rsplit_once('_') {
		Some((head, last)) => (Some(head), last),
		None => (None, snake.as_str()),
	};

	let singular = singularize(last);
	let joined = match head {
		Some(head) => format!("{}_{}", head, singular),
		None => singular,
	};

	to_pascal_case(&joined)
}

/// Normalizes a fixture field name to its relation lookup form (camelCase).
///
/// # Examples
///
/// ```
/// use reinhardt_fixtures::naming::relation_name;
///
/// assert_eq!(relation_name("roles"), "roles");
/// assert_eq!(relation_name("user_roles"), "userRoles");
/// assert_eq!(relation_name("favorite-game"), "favoriteGame");
/// ```
pub fn relation_name(field: &str) -> String {
	let pascal = to_pascal_case(field);
	let mut chars = pascal.chars();
	match chars.next() {
		Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
		None => String::new(),
	}
}

/// Reduces a single lowercase English word to its singular form.
///
/// # Examples
///
/// ```
/// use reinhardt_fixtures::naming::singularize;
///
/// assert_eq!(singularize("roles"), "role");
/// assert_eq!(singularize("boxes"), "box");
/// assert_eq!(singularize("status"), "status");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("movies"), "movie");
/// ```
pub fn singularize(word: &str) -> String {
	let lower = word.to_ascii_lowercase();

	if UNCOUNTABLE.contains(&lower.as_str()) {
		return word.to_string();
	}

	if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
		return (*singular).to_string();
	}

	let stem = |suffix_len: usize| word[..word.len() - suffix_len].to_string();

	if lower.ends_with("ies") && lower.len() > 3 {
		// "ties", "pies": a one-letter stem keeps its "ie".
		if lower.len() == 4 || IE_SINGULARS.contains(&&lower[..lower.len() - 1]) {
			return stem(1);
		}
		return stem(3) + "y";
	}
	if lower.ends_with("oes") {
		if OE_PLURALS.contains(&lower.as_str()) {
			return stem(1);
		}
		return stem(2);
	}
	if let Some(singular) = lower.strip_suffix("es")
		&& ES_AFTER_S
			.iter()
			.any(|s| singular == *s || (s.len() > 3 && singular.ends_with(s)))
	{
		return stem(2);
	}
	if lower.ends_with("sses")
		|| lower.ends_with("xes")
		|| lower.ends_with("ches")
		|| lower.ends_with("shes")
	{
		return stem(2);
	}
	if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
		return word.to_string();
	}
	if lower.ends_with('s') && lower.len() > 1 {
		return stem(1);
	}

	word.to_string()
}

/// Convert a string to PascalCase.
///
/// # Examples
///
/// ```
/// use reinhardt_fixtures::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("user_profiles"), "UserProfiles");
/// assert_eq!(to_pascal_case("users"), "Users");
/// assert_eq!(to_pascal_case("userProfiles"), "UserProfiles");
/// ```
pub fn to_pascal_case(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	let mut capitalize_next = true;
	let mut prev_was_upper = false;

	for ch in s.chars() {
		if ch == '_' || ch == '-' || ch == ' ' {
			capitalize_next = true;
			prev_was_upper = false;
		} else if ch.is_ascii_uppercase() {
			if prev_was_upper {
				result.push(ch.to_ascii_lowercase());
			} else {
				result.push(ch);
			}
			capitalize_next = false;
			prev_was_upper = true;
		} else if capitalize_next {
			result.push(ch.to_ascii_uppercase());
			capitalize_next = false;
			prev_was_upper = false;
		} else {
			result.push(ch);
			prev_was_upper = false;
		}
	}

	result
}

/// Convert a string to snake_case.
///
/// # Examples
///
/// ```
/// use reinhardt_fixtures::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("UserProfiles"), "user_profiles");
/// assert_eq!(to_snake_case("user-profiles"), "user_profiles");
/// assert_eq!(to_snake_case("users"), "users");
/// ```
pub fn to_snake_case(s: &str) -> String {
	let mut result = String::with_capacity(s.len() + 4);
	let mut prev_was_separator = true;

	for ch in s.chars() {
		if ch == '_' || ch == '-' || ch == ' ' {
			if !prev_was_separator {
				result.push('_');
			}
			prev_was_separator = true;
		} else if ch.is_ascii_uppercase() {
			if !prev_was_separator {
				result.push('_');
			}
			result.push(ch.to_ascii_lowercase());
			prev_was_separator = false;
		} else {
			result.push(ch);
			prev_was_separator = false;
		}
	}

	result
}
