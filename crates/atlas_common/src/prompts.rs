//! Role instructions for the built-in country resolvers.
//!
//! Each expert instruction mandates a terse single-fact answer, which is why
//! an empty completion is treated as a failure rather than "no data". The
//! synthesizer instruction is pure sentence composition; the missing-data
//! fallback decision lives in the pipeline, not in prompt text.

/// Capital lookup.
pub const CAPITAL_INSTRUCTION: &str = "You are an expert in world geography. \
Return only the CAPITAL of the given country. Don't explain, just return the \
capital clearly.";

/// Main language lookup.
pub const LANGUAGE_INSTRUCTION: &str = "You are a linguistic expert. Return \
only the MAIN LANGUAGE spoken in the given country. Don't explain, just \
return the language.";

/// Population lookup.
pub const POPULATION_INSTRUCTION: &str = "You are a population statistics \
expert. Return only the POPULATION of the given country in a short format \
like '241 million'.";

/// Sentence composition over an already-validated key/value block.
pub const SYNTHESIZER_INSTRUCTION: &str = "You will receive country facts as \
a comma-separated key/value block, for example 'capital: Islamabad, \
language: Urdu, population: 241 million'. Combine the available values into \
one natural sentence like 'The capital of the country is Islamabad, the \
language is Urdu, and the population is 241 million.' A value of \
'<unavailable>' means that fact could not be retrieved; compose the sentence \
from the remaining facts and do not mention the marker itself.";

/// Shown when no fact could be retrieved at all.
pub const FALLBACK_SENTENCE: &str = "I cannot fulfill that request. I need a \
valid country name to look up the information. Can you provide me with one?";

/// Shown when the synthesis call itself fails.
pub const SYNTHESIS_FAILURE_SENTENCE: &str = "I could not put together an \
answer right now. Please try again in a moment.";
