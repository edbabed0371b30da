// src/noyau/jetons.rs
//
// Normalisation + tokenisation + réécriture des factorielles.
// Aucune chaîne n’est jamais "exécutée" : on produit des jetons typés,
// puis rpn.rs construit un arbre évalué par expr.rs.

use std::f64::consts::{E, PI};

use super::erreur::{ErreurCalcul, Resultat};

/// Table fixe des fonctions connues (unaire).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log, // base 10
    Ln,
    Exp,
    Fact, // cible de la réécriture "x!"
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Some(match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "sqrt" => Fonction::Sqrt,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "exp" => Fonction::Exp,
            "fact" => Fonction::Fact,
            _ => return None,
        })
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Exp => "exp",
            Fonction::Fact => "fact",
        }
    }

    /// sin/cos/tan consultent le mode DEG/RAD.
    pub fn est_trig(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^
    Bang,  // ! postfixe (disparaît après réécriture)

    /// Moins unaire : produit uniquement par to_rpn.
    Neg,

    LPar,
    RPar,
}

/* ------------------------ Normalisation (glyphes) ------------------------ */

/// Glyphes d’affichage -> opérateurs canoniques.
/// × ∗ · => *   ÷ => /   − => -   ** => ^
///
/// La lettre `x` n’est PAS un signe de multiplication : la remplacer casserait
/// `exp(`. `2x3` reste donc tel quel et le tokenizer le refuse (identifiant inconnu).
pub fn normaliser(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().chars() {
        match c {
            '×' | '∗' | '·' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            _ => out.push(c),
        }
    }
    out.replace("**", "^")
}

/* ------------------------ Tokenisation ------------------------ */

/// Tokenize une chaîne normalisée.
/// Supporte:
/// - nombres décimaux (12, 3.5, .5, 1e-3)
/// - opérateurs + - * / % ^ !
/// - parenthèses ( )
/// - π / pi, e (Euler), ans (si `reponse` est fourni)
/// - fonctions sin cos tan sqrt log ln exp fact (insensible à la casse), √
pub fn tokenize(s: &str, reponse: Option<f64>) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Num(PI)),
            '√' => Some(Tok::Fonction(Fonction::Sqrt)),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre : chiffres [. chiffres] [e[+-]chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            // exposant seulement s’il est complet ("2e" reste 2 puis la constante e)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let txt: String = chars[start..i].iter().collect();
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            let t = match w.as_str() {
                "pi" => Tok::Num(PI),
                "e" => Tok::Num(E),
                "ans" => match reponse {
                    Some(v) => Tok::Num(v),
                    None => return Err(ErreurCalcul::syntaxe("ans indisponible")),
                },
                _ => match Fonction::depuis_nom(&w) {
                    Some(f) => Tok::Fonction(f),
                    None => {
                        return Err(ErreurCalcul::syntaxe(format!("identifiant inconnu: {word}")))
                    }
                },
            };
            out.push(t);
            continue;
        }

        return Err(ErreurCalcul::CaractereInvalide(c));
    }

    Ok(out)
}

/* ------------------------ Factorielle postfixe ------------------------ */

/// Début de l’opérande qui précède un '!' en position `i`.
/// Opérande = nombre, ou groupe parenthésé (avec sa fonction s’il y en a une).
fn debut_operande(toks: &[Tok], i: usize) -> Resultat<usize> {
    if i == 0 {
        return Err(ErreurCalcul::syntaxe("'!' sans opérande"));
    }
    match toks[i - 1] {
        Tok::Num(_) => Ok(i - 1),
        Tok::RPar => {
            let mut prof: usize = 0;
            let mut j = i - 1;
            loop {
                match toks[j] {
                    Tok::RPar => prof += 1,
                    Tok::LPar => {
                        prof -= 1;
                        if prof == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                if j == 0 {
                    return Err(ErreurCalcul::syntaxe("parenthèses non équilibrées"));
                }
                j -= 1;
            }
            if j > 0 && matches!(toks[j - 1], Tok::Fonction(_)) {
                Ok(j - 1)
            } else {
                Ok(j)
            }
        }
        _ => Err(ErreurCalcul::syntaxe("'!' après un opérateur")),
    }
}

/// Réécrit chaque `x!` en `fact(x)`, le plus à gauche d’abord (donc le plus interne).
///
/// La boucle est bornée par la longueur de l’entrée : chaque passe retire un '!',
/// une entrée qui ne converge pas est une erreur de syntaxe.
pub fn desucrer_factorielles(tokens: Vec<Tok>) -> Resultat<Vec<Tok>> {
    let limite = tokens.len() + 1;
    let mut toks = tokens;

    for _ in 0..limite {
        let Some(i) = toks.iter().position(|t| *t == Tok::Bang) else {
            return Ok(toks);
        };
        let debut = debut_operande(&toks, i)?;

        let mut neuf = Vec::with_capacity(toks.len() + 2);
        neuf.extend_from_slice(&toks[..debut]);
        neuf.push(Tok::Fonction(Fonction::Fact));
        neuf.push(Tok::LPar);
        neuf.extend_from_slice(&toks[debut..i]);
        neuf.push(Tok::RPar);
        neuf.extend_from_slice(&toks[i + 1..]);
        toks = neuf;
    }

    Err(ErreurCalcul::syntaxe("factorielle : réécriture sans fin"))
}

/// Format utilitaire (debug/démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
