//! Identifier injection by regular-expression substitution over XML text
//!
//! The substitutions are literal text rewrites; documents are never parsed as
//! XML. Attribute quoting must be double quotes for a field to be matched.

use crate::error::Result;
use crate::ids::IdentifierTable;
use crate::scanner::SourceKind;
use regex::{Captures, NoExpand, Regex};

/// `dataType` marker of the game-system entry in an index file
const GAMESYSTEM_DATA_TYPE: &str = r#"dataType="gamesystem""#;

/// Patterns locating the `dataId` field of one kind of `<dataIndexEntry>`
///
/// Two patterns cover `dataId` appearing after or before the selecting
/// attribute, so attribute order inside the element does not matter.
#[derive(Debug)]
struct EntryPatterns {
    id_after: Regex,
    id_before: Regex,
}

impl EntryPatterns {
    /// `selector` is a regex fragment matching the attribute that picks the entry
    fn new(selector: &str) -> Result<Self> {
        let id_after = Regex::new(&format!(
            r#"(<dataIndexEntry\b[^>]*?\b{selector}[^>]*?\bdataId=)"[^"]*""#
        ))?;
        let id_before = Regex::new(&format!(
            r#"(<dataIndexEntry\b[^>]*?\bdataId=)"[^"]*"([^>]*?\b{selector})"#
        ))?;
        Ok(Self { id_after, id_before })
    }

    fn replace(&self, text: &str, id: &str) -> String {
        let text = self.id_after.replace_all(text, |caps: &Captures| {
            format!("{}\"{}\"", &caps[1], id)
        });
        self.id_before
            .replace_all(&text, |caps: &Captures| {
                format!("{}\"{}\"{}", &caps[1], id, &caps[2])
            })
            .into_owned()
    }
}

/// Compiled substitutions for one identifier table
#[derive(Debug)]
pub struct Rewriter {
    game_system_id: String,
    game_system_ref: Regex,
    catalogue_element: Regex,
    game_system_element: Regex,
    index_game_system: EntryPatterns,
    /// (catalogue identifier, patterns for `filePath="<name>.catz"`)
    index_catalogues: Vec<(String, EntryPatterns)>,
}

impl Rewriter {
    /// Compile every pattern needed for `table`
    ///
    /// Catalogue names are regex-escaped, so `Dark.Elves` only matches the
    /// literal file path `Dark.Elves.catz`.
    pub fn new(table: &IdentifierTable) -> Result<Self> {
        let archive_ext = regex::escape(SourceKind::Catalogue.archive_extension());

        let index_catalogues = table
            .iter()
            .map(|(name, id)| -> Result<(String, EntryPatterns)> {
                let selector = format!(r#"filePath="{}\.{}""#, regex::escape(name), archive_ext);
                Ok((id.to_string(), EntryPatterns::new(&selector)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            game_system_id: table.game_system_id().to_string(),
            game_system_ref: Regex::new(r#"gameSystemId="[^"]*""#)?,
            catalogue_element: Regex::new(r#"<catalogue id="[^"]*""#)?,
            game_system_element: Regex::new(r#"<gameSystem id="[^"]*""#)?,
            index_game_system: EntryPatterns::new(GAMESYSTEM_DATA_TYPE)?,
            index_catalogues,
        })
    }

    /// Inject the game-system reference and the catalogue's own identifier
    pub fn rewrite_catalogue(&self, text: &str, catalogue_id: &str) -> String {
        let system_ref = format!(r#"gameSystemId="{}""#, self.game_system_id);
        let element = format!(r#"<catalogue id="{}""#, catalogue_id);

        let text = self.game_system_ref.replace_all(text, NoExpand(&system_ref));
        self.catalogue_element
            .replace_all(&text, NoExpand(&element))
            .into_owned()
    }

    /// Inject the game-system identifier into the `<gameSystem>` element
    pub fn rewrite_game_system(&self, text: &str) -> String {
        let element = format!(r#"<gameSystem id="{}""#, self.game_system_id);
        self.game_system_element
            .replace_all(text, NoExpand(&element))
            .into_owned()
    }

    /// Rewrite `dataId` fields of the index entries known to the table
    ///
    /// Entries whose `filePath` matches no table key are left untouched.
    pub fn rewrite_index(&self, text: &str) -> String {
        let mut text = self.index_game_system.replace(text, &self.game_system_id);
        for (id, patterns) in &self.index_catalogues {
            text = patterns.replace(&text, id);
        }
        text
    }
}
