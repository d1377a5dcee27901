/// An iterator that can look at its next item without consuming it.
pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// Consume the next item if it equals `pat`.
    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        self.eat_if(|item| *item == pat)
    }

    fn eat_if(&mut self, pred: impl FnOnce(&Self::Item) -> bool) -> bool {
        match self.peek() {
            Some(item) if pred(&item) => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Consume items while `pred` holds, returning how many were eaten.
    fn eat_while(&mut self, mut pred: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut count = 0;
        while self.eat_if(&mut pred) {
            count += 1;
        }
        count
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl<P: Peek> Peek for &mut P {
    fn peek(&self) -> Option<Self::Item> {
        (**self).peek()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
