//! A small corpus laid out like a collected-works edition: a table of
//! contents, a six-newline break, then every work under its title.

#![allow(dead_code)]

pub const SONNETS: &str = "THE SONNETS";
pub const HAMLET: &str = "THE TRAGEDY OF HAMLET, PRINCE OF DENMARK";
pub const TEMPEST: &str = "THE TEMPEST";

pub const CORPUS: &str = "THE COLLECTED WORKS

Contents

THE SONNETS

THE TRAGEDY OF HAMLET, PRINCE OF DENMARK

THE TEMPEST





THE SONNETS

18

Shall I compare thee to a summer's day?
Thou art more lovely and more temperate:
Rough winds do shake the darling buds of May,
And summer's lease hath all too short a date;

THE TRAGEDY OF HAMLET, PRINCE OF DENMARK

BARNARDO.
Who's there?

FRANCISCO.
Nay, answer me. Stand and unfold yourself.

HAMLET.
To be, or not to be, that is the question:
Whether 'tis nobler in the mind to suffer

THE TEMPEST

MIRANDA.
O brave new world,
That has such people in't!

PROSPERO.
Our revels now are ended. These our actors,
As I foretold you, were all spirits and
Are melted into air, into thin air:
And, like the baseless fabric of this vision,
The cloud-capp'd towers, the gorgeous palaces,
The solemn temples, the great globe itself,
Yea, all which it inherit, shall dissolve,
And, like this insubstantial pageant faded,
Leave not a rack behind. We are such stuff
As dreams are made on; and our little life
Is rounded with a sleep. Sir, I am vex'd;
Bear with my weakness; my old brain is troubled:
Be not disturb'd with my infirmity.
";

/// The corpus as it arrives from a Windows-encoded download: CRLF line
/// endings and curly apostrophes decoded with the wrong code page
pub fn mangled_corpus() -> String {
    CORPUS
        .replace("summer's", "summer\u{e2}\u{20ac}\u{2122}s")
        .replace('\n', "\r\n")
}
