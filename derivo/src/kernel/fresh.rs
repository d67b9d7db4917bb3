use crate::Type;
use std::collections::BTreeSet;

/// Generator of type names that do not occur in a set of used names.
#[derive(Clone, Debug, Default)]
pub struct Fresh {
    used: BTreeSet<String>,
    next: usize,
}

impl Fresh {
    /// Create a generator that avoids the given names.
    pub fn new(used: impl IntoIterator<Item = String>) -> Self {
        let used = used.into_iter().collect();
        Self { used, next: 0 }
    }

    /// Avoid the given names from now on.
    pub fn avoid(&mut self, names: impl IntoIterator<Item = String>) {
        self.used.extend(names)
    }

    /// Return a new name from the sequence `A`, ..., `Z`, `A1`, ..., `Z1`, `A2`, ...
    pub fn name(&mut self) -> String {
        loop {
            let i = self.next;
            self.next += 1;
            let letter = char::from(b'A' + (i % 26) as u8);
            let name = match i / 26 {
                0 => letter.to_string(),
                n => format!("{}{}", letter, n),
            };
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Return `hint` if it is new, else `hint` followed by the smallest number making it new.
    pub fn like(&mut self, hint: &str) -> String {
        let mut name = hint.to_string();
        let mut i = 0;
        while self.used.contains(&name) {
            i += 1;
            name = format!("{}{}", hint, i);
        }
        self.used.insert(name.clone());
        name
    }

    /// Replace all outermost quantifiers by new names.
    ///
    /// Return the new names, starting from the outermost quantifier.
    pub fn degeneralize_all(&mut self, ty: &Type) -> (Vec<String>, Type) {
        let mut names = Vec::new();
        let mut ty = ty.clone();
        while let Type::All(x, a) = &ty {
            let x = self.like(x);
            ty = a.subst_top(&Type::name(&x));
            names.push(x);
        }
        (names, ty)
    }

    /// Replace all outermost quantifiers by new names.
    pub fn inst(&mut self, ty: &Type) -> Type {
        self.degeneralize_all(ty).1
    }
}

#[test]
fn names() {
    let mut fresh = Fresh::new(["B".to_string(), "X".to_string()]);
    assert_eq!(fresh.name(), "A");
    assert_eq!(fresh.name(), "C");
    assert_eq!(fresh.like("X"), "X1");
    assert_eq!(fresh.like("X"), "X2");
    assert_eq!(fresh.like("Y"), "Y");

    let mut fresh = Fresh::default();
    let names: Vec<_> = (0..28).map(|_| fresh.name()).collect();
    assert_eq!(names[25..], ["Z", "A1", "B1"]);
}

#[test]
fn degeneralize_all() {
    // ∀X. ∀Y. X → Y
    let body = Type::arr(Type::Var(1, 2), Type::Var(0, 2));
    let ty = Type::All("X".into(), Box::new(Type::All("Y".into(), Box::new(body))));
    let mut fresh = Fresh::new(["Y".to_string()]);
    let (names, mono) = fresh.degeneralize_all(&ty);
    assert_eq!(names, ["X", "Y1"]);
    assert_eq!(mono, Type::arr(Type::name("X"), Type::name("Y1")));
}
