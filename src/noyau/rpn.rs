// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant l’alternance
//   valeur / opérateur (toute entrée mal formée => SyntaxeInvalide)
// - Puis reconstruire Expr
//
// Règles:
// - Fonction(f) : doit être suivie de '(' ; sortie après la parenthèse fermante.
// - Moins unaire : jeton Neg (préfixe), plus fort que * / %, plus faible que ^
//   => -2^2 = -(2^2), 2*-3 = 2*(-3)
// - Plus unaire : ignoré.
// - ^ associatif à droite, le reste à gauche.

use super::erreur::{ErreurCalcul, Resultat};
use super::expr::Expr;
use super::jetons::Tok;

/// Garde-fou : profondeur maximale de l’arbre (pile d’évaluation récursive).
pub const PROFONDEUR_MAX: usize = 1000;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

fn est_operateur(t: &Tok) -> bool {
    precedence(t) > 0
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Num(30), Slash, Num(2), RPar]
///   rpn:    [Num(30), Num(2), Slash, Fonction(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // true tant qu’on attend un opérande (début, après opérateur ou '(')
    let mut attend_valeur = true;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) => {
                if !attend_valeur {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant entre deux valeurs"));
                }
                out.push(tok.clone());
                attend_valeur = false;
            }

            Tok::Fonction(f) => {
                if !attend_valeur {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant avant une fonction"));
                }
                if tokens.get(i + 1) != Some(&Tok::LPar) {
                    return Err(ErreurCalcul::syntaxe(format!("{} : '(' attendue", f.nom())));
                }
                ops.push(tok.clone());
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurCalcul::syntaxe("opérateur manquant avant '('"));
                }
                ops.push(Tok::LPar);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ErreurCalcul::syntaxe("')' inattendue"));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(op) => out.push(op),
                        None => return Err(ErreurCalcul::syntaxe("')' sans '(' correspondante")),
                    }
                }
                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Fonction(_)) = ops.last() {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
                attend_valeur = false;
            }

            Tok::Minus if attend_valeur => {
                // préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus if attend_valeur => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                if attend_valeur {
                    return Err(ErreurCalcul::syntaxe("opérande manquant"));
                }

                while let Some(top) = ops.last() {
                    if !est_operateur(top) {
                        break;
                    }
                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok.clone());
                attend_valeur = true;
            }

            Tok::Bang | Tok::Neg => {
                return Err(ErreurCalcul::syntaxe("jeton inattendu"));
            }
        }
    }

    if attend_valeur {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
/// Refuse les arbres plus profonds que PROFONDEUR_MAX.
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Expr> {
    // (noeud, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let invalide = || ErreurCalcul::syntaxe("expression invalide");

    for tok in rpn {
        let (e, prof) = match tok {
            Tok::Num(v) => (Expr::Nombre(*v), 1),

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                (Expr::Neg(Box::new(x)), p + 1)
            }

            Tok::Fonction(f) => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                (Expr::Appel(*f, Box::new(x)), p + 1)
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    Tok::Percent => Expr::Rem(a, b),
                    _ => Expr::Pow(a, b),
                };
                (e, pa.max(pb) + 1)
            }

            Tok::LPar | Tok::RPar | Tok::Bang => {
                return Err(ErreurCalcul::syntaxe("jeton inattendu en RPN"))
            }
        };

        if prof > PROFONDEUR_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop imbriquée"));
        }
        st.push((e, prof));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}
