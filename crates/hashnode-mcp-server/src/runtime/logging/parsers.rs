use std::{fmt::Display, marker::PhantomData, str::FromStr};

use serde::Deserializer;

/// Deserialize any `FromStr` type from a string, e.g. a [tracing::Level]
pub(super) fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    struct FromStrVisitor<Inner>(PhantomData<Inner>);

    impl<Inner> serde::de::Visitor<'_> for FromStrVisitor<Inner>
    where
        Inner: FromStr,
        <Inner as FromStr>::Err: Display,
    {
        type Value = Inner;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Inner::from_str(v.trim()).map_err(|e| serde::de::Error::custom(e.to_string()))
        }
    }

    deserializer.deserialize_str(FromStrVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use tracing::Level;

    #[derive(Debug, Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "super::from_str")] Level);

    #[test]
    fn it_parses_padded_levels() {
        let Wrapper(level) = serde_json::from_str(r#"" error ""#).unwrap();
        assert_eq!(level, Level::ERROR);
    }

    #[test]
    fn it_reports_the_parse_error() {
        let error = serde_json::from_str::<Wrapper>(r#""verbose""#).unwrap_err();
        assert!(error.to_string().contains("error parsing level"));
    }
}
