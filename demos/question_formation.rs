//! Deep structure → surface question
//!
//! Builds "you play football" and "you are happy" inside full clauses and
//! derives their yes/no questions.
//!
//! Run with: cargo run --example question_formation

use xbar::catalog::{clause, noun, verb};
use xbar::{ProjectionError, Tree, question};

fn main() -> Result<(), ProjectionError> {
    println!("=== xbar: Question Formation ===\n");

    let mut tree = Tree::new();
    let subject = noun("you").build(&mut tree)?;
    let object = noun("football").build(&mut tree)?;
    let vp = verb("play")
        .specifier(&subject)
        .complement(&object)
        .build(&mut tree)?;
    let cp = clause(&mut tree, &vp)?;

    println!("Deep structure:");
    println!("{}\n", tree.display(cp.root()));
    println!("Terminals: {:?}", tree.terminal_texts(cp.root()));
    println!("Words:     {}", tree.words(cp.root()).join(" "));

    let (surface, q) = question(&tree, &cp)?;
    println!("Question:  {}?\n", surface.words(q.root()).join(" "));

    let mut tree = Tree::new();
    let vp = verb("be").specifier("you").complement("happy").build(&mut tree)?;
    let cp = clause(&mut tree, &vp)?;
    let (surface, q) = question(&tree, &cp)?;
    println!("Statement: {}", tree.words(cp.root()).join(" "));
    println!("Question:  {}?", surface.words(q.root()).join(" "));
    println!("{}", surface.summary(&q));

    Ok(())
}
