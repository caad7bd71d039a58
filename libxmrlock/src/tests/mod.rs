mod atomic_swap;
