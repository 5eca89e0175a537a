/// Normalize a free-text license name to its SPDX identifier.
///
/// Lookup is exact and case-sensitive; no trimming. Unmapped input is
/// returned unchanged (the table is known-incomplete), so the empty string
/// maps to itself and canonical SPDX ids are already passthrough.
pub fn normalize(raw: &str) -> String {
    match raw {
        "Apache License 2.0"
        | "Apache License, Version 2.0"
        | "The Apache Software License, Version 2.0"
        | "The Apache License, Version 2.0"
        | "Apache License Version 2.0"
        | "Apache 2.0"
        | "The Apache Software License"
        | "Apache Software License - Version 2.0"
        | "The Apache-2.0" => "Apache-2.0".to_string(),

        "The MIT License" | "MIT License" => "MIT".to_string(),

        "BSD License 3" | "The BSD 3-Clause License" => "BSD-3-Clause".to_string(),
        "BSD 2-Clause License" => "BSD-2-Clause".to_string(),

        "Eclipse Public License - v 1.0" => "EPL-1.0".to_string(),
        "EPL-2.0 - Version 1.0"
        | "EPL-2.0 v2.0"
        | "Eclipse Public License - v 2.0"
        | "Eclipse Public License v. 2.0"
        | "Eclipse Public License, Version 2.0"
        | "Eclipse Public License"
        | "Eclipse Public License 2.0"
        | "Eclipse Public License v2.0"
        | "EPL 2.0" => "EPL-2.0".to_string(),

        "EDL 1.0"
        | "Eclipse Distribution License - v 1.0"
        | "Eclipse Distribution License" => "EDL-1.0".to_string(),

        "GPL2 w/ CPE"
        | "GNU General Public License, version 2 with the GNU Classpath Exception"
        | "CDDL-1.1 AND GPL-2.0-only WITH Classpath-exception-2.0"
        | "CDDL + GPLv2 with classpath exception" => {
            "GPL-2.0-with-classpath-exception".to_string()
        }

        "Universal Permissive License, Version 1.0" => "UPL-1.0".to_string(),
        "GNU Library General Public License v2.1 or later" => "LGPL-2.1-or-later".to_string(),

        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_names() {
        assert_eq!(normalize("The MIT License"), "MIT");
        assert_eq!(normalize("Apache License, Version 2.0"), "Apache-2.0");
        assert_eq!(normalize("BSD License 3"), "BSD-3-Clause");
        assert_eq!(normalize("Eclipse Public License - v 1.0"), "EPL-1.0");
        assert_eq!(normalize("EPL 2.0"), "EPL-2.0");
        assert_eq!(normalize("Eclipse Distribution License"), "EDL-1.0");
        assert_eq!(
            normalize("CDDL + GPLv2 with classpath exception"),
            "GPL-2.0-with-classpath-exception"
        );
        assert_eq!(
            normalize("GNU Library General Public License v2.1 or later"),
            "LGPL-2.1-or-later"
        );
    }

    #[test]
    fn test_canonical_ids_pass_through() {
        assert_eq!(normalize("MIT"), "MIT");
        assert_eq!(normalize("Apache-2.0"), "Apache-2.0");
        assert_eq!(normalize("MIT-0"), "MIT-0");
        assert_eq!(normalize("MS-PL"), "MS-PL");
        assert_eq!(normalize("PostgreSQL"), "PostgreSQL");
    }

    #[test]
    fn test_unmapped_is_identity() {
        assert_eq!(normalize("Some Custom License"), "Some Custom License");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // "mit license" is not a table key; no folding happens
        assert_eq!(normalize("mit license"), "mit license");
        assert_eq!(normalize(" The MIT License"), " The MIT License");
    }
}
