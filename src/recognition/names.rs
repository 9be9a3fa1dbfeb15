//! Dictionary of common first names used to recognise author lines.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Common first names (US census top names plus names frequent among authors)
const COMMON_FIRST_NAMES: &[&str] = &[
    // Male
    "james", "robert", "john", "michael", "david", "william", "richard", "joseph",
    "thomas", "christopher", "charles", "daniel", "matthew", "anthony", "mark",
    "donald", "steven", "andrew", "paul", "joshua", "kenneth", "kevin", "brian",
    "george", "timothy", "ronald", "jason", "edward", "jeffrey", "ryan", "jacob",
    "gary", "nicholas", "eric", "jonathan", "stephen", "larry", "justin", "scott",
    "brandon", "benjamin", "samuel", "gregory", "alexander", "patrick", "frank",
    "raymond", "jack", "dennis", "jerry", "tyler", "aaron", "jose", "adam",
    "nathan", "henry", "zachary", "douglas", "peter", "kyle", "noah", "ethan",
    "jeremy", "walter", "christian", "keith", "roger", "terry", "sean", "austin",
    "gerald", "carl", "harold", "dylan", "arthur", "lawrence", "jordan", "jesse",
    "bryan", "billy", "bruce", "gabriel", "joe", "logan", "alan", "juan", "albert",
    "willie", "elijah", "wayne", "randy", "vincent", "mason", "roy", "ralph",
    "bobby", "russell", "bradley", "philip", "eugene",
    // Female
    "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara", "susan",
    "jessica", "sarah", "karen", "lisa", "nancy", "betty", "sandra", "margaret",
    "ashley", "kimberly", "emily", "donna", "michelle", "carol", "amanda",
    "melissa", "deborah", "stephanie", "dorothy", "rebecca", "sharon", "laura",
    "cynthia", "amy", "kathleen", "angela", "shirley", "brenda", "emma", "anna",
    "pamela", "nicole", "samantha", "katherine", "christine", "helen", "debra",
    "rachel", "carolyn", "janet", "maria", "catherine", "heather", "diane",
    "olivia", "julie", "joyce", "victoria", "ruth", "virginia", "lauren", "kelly",
    "christina", "joan", "evelyn", "judith", "andrea", "hannah", "cheryl", "megan",
    "jacqueline", "martha", "madison", "teresa", "gloria", "janice", "sara", "ann",
    "abigail", "kathryn", "sophia", "frances", "jean", "judy", "alice", "isabella",
    "julia", "grace", "denise", "amber", "beverly", "danielle", "marilyn",
    "charlotte", "theresa", "natalie", "diana", "brittany", "doris", "kayla",
    "alexis", "lori", "marie",
    // Frequent author first names
    "agatha", "ernest", "franz", "leo", "fyodor", "oscar", "edgar", "jules",
    "victor", "alexandre", "jane", "anne", "sylvia", "harper", "toni", "maya",
    "zora", "ursula", "octavia", "flannery", "carson", "eudora", "willa", "edith",
    "kate", "pearl", "daphne", "iris", "muriel", "ngaio", "p.d.", "sue", "minette",
    "val",
    // German and European
    "heinrich", "johann", "wolfgang", "friedrich", "ludwig", "hermann", "hans",
    "karl", "ernst", "wilhelm", "gottfried", "rainer", "stefan", "günter",
    "bertolt", "max", "georg", "erich", "sigmund",
    // British
    "nigel", "graham", "colin", "ian", "hugh", "clive", "trevor", "derek", "barry",
    "geoffrey", "neville", "reginald", "alistair", "hamish", "angus", "rupert",
    // Diminutives
    "mike", "chris", "dan", "matt", "tony", "steve", "andy", "josh", "ken", "tim",
    "tom", "bob", "bill", "rick", "jim", "sam", "ben", "nick", "alex", "pat",
    "liz", "beth", "jen", "meg", "kim", "deb", "becky", "vicky",
    // Seen on covers
    "craig", "morris", "riley", "dean", "lee", "ray", "neil", "glen", "ross",
    "lloyd", "cecil", "clyde", "lynn", "dale", "perry", "cody", "chad", "wade",
    "brett", "blake", "drew", "troy", "seth", "ivan", "omar", "kurt", "leon",
    "luis", "earl", "gene", "joel", "lyle", "marc", "neal", "todd", "dana",
    "jill", "tina", "gail", "vera", "faye", "nina", "rosa", "alma", "ida", "ivy",
    "ada", "ora", "eva", "ava", "mia", "zoe",
];

/// Case-insensitive, read-only set of known first names
///
/// Built once and shared behind an [`Arc`]; lookups ignore `.` and `,` so that
/// cover spellings like `"P.D."` or `"Agatha,"` still match.
#[derive(Debug, Clone)]
pub struct NameDictionary {
    names: Arc<HashSet<String>>,
}

impl NameDictionary {
    /// Build a dictionary from arbitrary names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            names: Arc::new(names),
        }
    }

    /// The built-in dictionary, constructed on first use
    pub fn builtin() -> Self {
        static BUILTIN: OnceLock<NameDictionary> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Self::new(COMMON_FIRST_NAMES.iter().copied()))
            .clone()
    }

    /// The built-in dictionary extended with extra names
    pub fn builtin_with<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: HashSet<String> = Self::builtin().names.as_ref().clone();
        names.extend(
            extra
                .into_iter()
                .map(|n| normalize(n.as_ref()))
                .filter(|n| !n.is_empty()),
        );
        Self {
            names: Arc::new(names),
        }
    }

    /// Check whether a word is a known first name
    pub fn contains(&self, word: &str) -> bool {
        self.names.contains(&normalize(word))
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for NameDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '.' && *c != ',')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let names = NameDictionary::builtin();
        assert!(names.contains("Agatha"));
        assert!(names.contains("HANNAH"));
        assert!(names.contains("heinrich"));
        assert!(!names.contains("Christie"));
    }

    #[test]
    fn test_punctuation_ignored() {
        let names = NameDictionary::builtin();
        assert!(names.contains("P.D."));
        assert!(names.contains("James,"));
        assert!(names.contains("Günter"));
    }

    #[test]
    fn test_builtin_with_extra_names() {
        let names = NameDictionary::builtin_with(["Ottessa", "Kazuo"]);
        assert!(names.contains("ottessa"));
        assert!(names.contains("Kazuo"));
        assert!(names.len() > NameDictionary::builtin().len());
        assert!(!NameDictionary::builtin().contains("Kazuo"));
    }

    #[test]
    fn test_custom_dictionary() {
        let names = NameDictionary::new(["Zadie", ""]);
        assert_eq!(names.len(), 1);
        assert!(names.contains("ZADIE"));
        assert!(!names.contains("agatha"));
    }
}
